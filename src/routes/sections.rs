use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::sections::requests::{
    CreateSectionRequest, SectionListParams, UpdateSectionRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SectionService;
use crate::utils::SafeIDI64;

static SECTION_SERVICE: Lazy<SectionService> = Lazy::new(SectionService::new_lazy);

pub async fn list_sections(
    req: HttpRequest,
    query: web::Query<SectionListParams>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.list_sections(&req, query.into_inner()).await
}

pub async fn create_section(
    req: HttpRequest,
    section_data: web::Json<CreateSectionRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE
        .create_section(&req, section_data.into_inner())
        .await
}

pub async fn get_section(req: HttpRequest, section_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.get_section(&req, section_id.0).await
}

pub async fn update_section(
    req: HttpRequest,
    section_id: SafeIDI64,
    update_data: web::Json<UpdateSectionRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE
        .update_section(&req, section_id.0, update_data.into_inner())
        .await
}

pub async fn delete_section(req: HttpRequest, section_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.delete_section(&req, section_id.0).await
}

// 配置路由
pub fn configure_sections_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sections")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_sections))
                    .route(
                        web::post()
                            .to(create_section)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_section))
                    .route(
                        web::put()
                            .to(update_section)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_section)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_section)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            ),
    );
}
