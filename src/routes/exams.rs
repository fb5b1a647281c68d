use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{CreateExamRequest, ExamListParams, UpdateExamRequest};
use crate::models::users::entities::UserRole;
use crate::services::ExamService;
use crate::utils::SafeIDI64;

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req, query.into_inner()).await
}

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_exam(&req, exam_data.into_inner())
        .await
}

pub async fn get_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(&req, exam_id.0).await
}

pub async fn update_exam(
    req: HttpRequest,
    exam_id: SafeIDI64,
    update_data: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(&req, exam_id.0, update_data.into_inner())
        .await
}

pub async fn delete_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, exam_id.0).await
}

pub async fn exam_results(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.exam_results(&req, exam_id.0).await
}

// 配置路由
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_exams))
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            )
            .route("/{id}/results", web::get().to(exam_results))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_exam))
                    .route(
                        web::put()
                            .to(update_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_exam)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            ),
    );
}
