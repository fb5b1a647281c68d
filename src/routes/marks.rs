use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::marks::requests::{
    BulkMarksRequest, CreateMarkRequest, MarkListParams, UpdateMarkRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::MarkService;
use crate::utils::SafeIDI64;

static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

pub async fn list_marks(
    req: HttpRequest,
    query: web::Query<MarkListParams>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_marks(&req, query.into_inner()).await
}

pub async fn create_mark(
    req: HttpRequest,
    mark_data: web::Json<CreateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .create_mark(&req, mark_data.into_inner())
        .await
}

pub async fn get_mark(req: HttpRequest, mark_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.get_mark(&req, mark_id.0).await
}

pub async fn update_mark(
    req: HttpRequest,
    mark_id: SafeIDI64,
    update_data: web::Json<UpdateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .update_mark(&req, mark_id.0, update_data.into_inner())
        .await
}

pub async fn delete_mark(req: HttpRequest, mark_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.delete_mark(&req, mark_id.0).await
}

pub async fn bulk_marks(
    req: HttpRequest,
    bulk_data: web::Json<BulkMarksRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.bulk_marks(&req, bulk_data.into_inner()).await
}

// 配置路由
pub fn configure_marks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/marks")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_marks))
                    .route(
                        web::post()
                            .to(create_mark)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    ),
            )
            .route(
                "/bulk",
                web::post()
                    .to(bulk_marks)
                    .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_mark))
                    .route(
                        web::put()
                            .to(update_mark)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_mark)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_mark)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teaching_roles())),
                    ),
            ),
    );
}
