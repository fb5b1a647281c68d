use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListParams, UpdateEnrollmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::SafeIDI64;

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list_enrollments(&req, query.into_inner()).await
}

pub async fn create_enrollment(
    req: HttpRequest,
    enrollment_data: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_enrollment(&req, enrollment_data.into_inner())
        .await
}

pub async fn get_enrollment(req: HttpRequest, enrollment_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.get_enrollment(&req, enrollment_id.0).await
}

pub async fn update_enrollment(
    req: HttpRequest,
    enrollment_id: SafeIDI64,
    update_data: web::Json<UpdateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .update_enrollment(&req, enrollment_id.0, update_data.into_inner())
        .await
}

pub async fn delete_enrollment(req: HttpRequest, enrollment_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.delete_enrollment(&req, enrollment_id.0).await
}

// 配置路由
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_enrollments))
                    .route(
                        web::post()
                            .to(create_enrollment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_enrollment))
                    .route(
                        web::put()
                            .to(update_enrollment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_enrollment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_enrollment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            ),
    );
}
