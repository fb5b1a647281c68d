use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListParams, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeIDI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.list_attendance(&req, query.into_inner()).await
}

pub async fn create_attendance(
    req: HttpRequest,
    attendance_data: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .create_attendance(&req, attendance_data.into_inner())
        .await
}

pub async fn get_attendance(req: HttpRequest, session_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_attendance(&req, session_id.0).await
}

pub async fn update_attendance(
    req: HttpRequest,
    session_id: SafeIDI64,
    update_data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, session_id.0, update_data.into_inner())
        .await
}

pub async fn delete_attendance(req: HttpRequest, session_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_attendance(&req, session_id.0).await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance))
                    .route(
                        web::post()
                            .to(create_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_attendance))
                    .route(
                        web::put()
                            .to(update_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    ),
            ),
    );
}
