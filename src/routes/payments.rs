use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::payments::requests::{CreatePaymentRequest, PaymentListParams};
use crate::models::users::entities::UserRole;
use crate::services::PaymentService;
use crate::utils::SafeIDI64;

static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentListParams>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.list_payments(&req, query.into_inner()).await
}

pub async fn create_payment(
    req: HttpRequest,
    payment_data: web::Json<CreatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .create_payment(&req, payment_data.into_inner())
        .await
}

pub async fn get_payment(req: HttpRequest, payment_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.get_payment(&req, payment_id.0).await
}

pub async fn delete_payment(req: HttpRequest, payment_id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.delete_payment(&req, payment_id.0).await
}

// 配置路由
pub fn configure_payments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payments")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_payments))
                    .route(
                        web::post()
                            .to(create_payment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_payment))
                    .route(
                        web::delete()
                            .to(delete_payment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            ),
    );
}
