use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::invoices::requests::{
    CreateInvoiceRequest, InvoiceListParams, UpdateInvoiceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::InvoiceService;
use crate::utils::SafeIDI64;

static INVOICE_SERVICE: Lazy<InvoiceService> = Lazy::new(InvoiceService::new_lazy);

pub async fn list_invoices(
    req: HttpRequest,
    query: web::Query<InvoiceListParams>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.list_invoices(&req, query.into_inner()).await
}

pub async fn create_invoice(
    req: HttpRequest,
    invoice_data: web::Json<CreateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE
        .create_invoice(&req, invoice_data.into_inner())
        .await
}

pub async fn get_invoice(req: HttpRequest, invoice_id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.get_invoice(&req, invoice_id.0).await
}

pub async fn update_invoice(
    req: HttpRequest,
    invoice_id: SafeIDI64,
    update_data: web::Json<UpdateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE
        .update_invoice(&req, invoice_id.0, update_data.into_inner())
        .await
}

pub async fn delete_invoice(req: HttpRequest, invoice_id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.delete_invoice(&req, invoice_id.0).await
}

pub async fn cancel_invoice(req: HttpRequest, invoice_id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.cancel_invoice(&req, invoice_id.0).await
}

// 配置路由
pub fn configure_invoices_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/invoices")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_invoices))
                    .route(
                        web::post()
                            .to(create_invoice)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            )
            .route(
                "/{id}/cancel",
                web::post()
                    .to(cancel_invoice)
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_invoice))
                    .route(
                        web::put()
                            .to(update_invoice)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_invoice)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_invoice)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            ),
    );
}
