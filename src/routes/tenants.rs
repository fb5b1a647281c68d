use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::tenants::requests::{
    CreateTenantRequest, TenantListParams, UpdateTenantRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TenantService;
use crate::utils::SafeIDI64;

static TENANT_SERVICE: Lazy<TenantService> = Lazy::new(TenantService::new_lazy);

pub async fn list_tenants(
    req: HttpRequest,
    query: web::Query<TenantListParams>,
) -> ActixResult<HttpResponse> {
    TENANT_SERVICE.list_tenants(&req, query.into_inner()).await
}

pub async fn create_tenant(
    req: HttpRequest,
    tenant_data: web::Json<CreateTenantRequest>,
) -> ActixResult<HttpResponse> {
    TENANT_SERVICE
        .create_tenant(&req, tenant_data.into_inner())
        .await
}

pub async fn get_tenant(req: HttpRequest, tenant_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TENANT_SERVICE.get_tenant(&req, tenant_id.0).await
}

pub async fn update_tenant(
    req: HttpRequest,
    tenant_id: SafeIDI64,
    update_data: web::Json<UpdateTenantRequest>,
) -> ActixResult<HttpResponse> {
    TENANT_SERVICE
        .update_tenant(&req, tenant_id.0, update_data.into_inner())
        .await
}

pub async fn delete_tenant(req: HttpRequest, tenant_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TENANT_SERVICE.delete_tenant(&req, tenant_id.0).await
}

// 租户管理仅对平台超级管理员开放
pub fn configure_tenants_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tenants")
            .wrap(middlewares::RequireRole::new_any(UserRole::platform_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_tenants))
            .route("", web::post().to(create_tenant))
            .route("/{id}", web::get().to(get_tenant))
            .route("/{id}", web::put().to(update_tenant))
            .route("/{id}", web::patch().to(update_tenant))
            .route("/{id}", web::delete().to(delete_tenant)),
    );
}
