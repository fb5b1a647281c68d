use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::timetables::requests::{
    CreateTimetablePeriodRequest, TimetableListParams, UpdateTimetablePeriodRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TimetableService;
use crate::utils::SafeIDI64;

static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);

pub async fn list_periods(
    req: HttpRequest,
    query: web::Query<TimetableListParams>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.list_periods(&req, query.into_inner()).await
}

pub async fn create_period(
    req: HttpRequest,
    period_data: web::Json<CreateTimetablePeriodRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .create_period(&req, period_data.into_inner())
        .await
}

pub async fn get_period(req: HttpRequest, period_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.get_period(&req, period_id.0).await
}

pub async fn update_period(
    req: HttpRequest,
    period_id: SafeIDI64,
    update_data: web::Json<UpdateTimetablePeriodRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .update_period(&req, period_id.0, update_data.into_inner())
        .await
}

pub async fn delete_period(req: HttpRequest, period_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.delete_period(&req, period_id.0).await
}

pub async fn section_timetable(
    req: HttpRequest,
    section_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.section_timetable(&req, section_id.0).await
}

// 配置路由
pub fn configure_timetables_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/timetables")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            // 班级周课表
            .route("/sections/{id}", web::get().to(section_timetable))
            .service(
                web::resource("")
                    .route(web::get().to(list_periods))
                    .route(
                        web::post()
                            .to(create_period)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_period))
                    .route(
                        web::put()
                            .to(update_period)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_period)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_period)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            ),
    );
}
