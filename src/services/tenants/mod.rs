//! 租户管理，仅限超级管理员

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::require_branch::tenant_cache_key;
use crate::models::tenants::entities::TenantStatus;
use crate::models::tenants::requests::{
    CreateTenantRequest, TenantListParams, UpdateTenantRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{finish, invalid, list_response, not_found, resolve_cache};
use crate::storage::Storage;
use crate::utils::validate::{require_text, validate_code};

pub struct TenantService {
    storage: Option<Arc<dyn Storage>>,
}

fn tenant_not_found() -> HttpResponse {
    not_found(ErrorCode::TenantNotFound, "Tenant not found")
}

fn normalize(req: CreateTenantRequest) -> Result<CreateTenantRequest, String> {
    let code = req.code.trim().to_string();
    validate_code(&code)?;
    Ok(CreateTenantRequest {
        name: require_text("name", &req.name, 128)?,
        code,
        status: Some(req.status.unwrap_or(TenantStatus::Active)),
    })
}

/// 租户变更后移除校区中间件缓存的租户状态
async fn evict_tenant(request: &HttpRequest, tenant_id: i64) {
    if let Some(cache) = resolve_cache(request) {
        cache.remove(&tenant_cache_key(tenant_id)).await;
    }
}

impl TenantService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_tenants(
        &self,
        request: &HttpRequest,
        query: TenantListParams,
    ) -> ActixResult<HttpResponse> {
        finish(async {
            let storage = self.get_storage(request)?;
            let page = storage.list_tenants_with_pagination(query).await?;
            Ok(list_response(page, "Tenant list retrieved successfully"))
        })
        .await
    }

    pub async fn create_tenant(
        &self,
        request: &HttpRequest,
        tenant_data: CreateTenantRequest,
    ) -> ActixResult<HttpResponse> {
        finish(async {
            let storage = self.get_storage(request)?;
            let tenant_data = normalize(tenant_data).map_err(invalid)?;

            let tenant = storage.create_tenant(tenant_data).await?;
            info!("Tenant {} ({}) created", tenant.id, tenant.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                tenant,
                "Tenant created successfully",
            )))
        })
        .await
    }

    pub async fn get_tenant(
        &self,
        request: &HttpRequest,
        tenant_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(async {
            let storage = self.get_storage(request)?;
            match storage.get_tenant_by_id(tenant_id).await? {
                Some(tenant) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                    tenant,
                    "Tenant retrieved successfully",
                ))),
                None => Err(tenant_not_found()),
            }
        })
        .await
    }

    pub async fn update_tenant(
        &self,
        request: &HttpRequest,
        tenant_id: i64,
        update_data: UpdateTenantRequest,
    ) -> ActixResult<HttpResponse> {
        finish(async {
            let storage = self.get_storage(request)?;
            let update_data = UpdateTenantRequest {
                name: update_data
                    .name
                    .map(|n| require_text("name", &n, 128))
                    .transpose()
                    .map_err(invalid)?,
                ..update_data
            };

            let tenant = storage
                .update_tenant(tenant_id, update_data)
                .await?
                .ok_or_else(tenant_not_found)?;
            evict_tenant(request, tenant_id).await;
            info!("Tenant {} updated (status {})", tenant.id, tenant.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                tenant,
                "Tenant updated successfully",
            )))
        })
        .await
    }

    pub async fn delete_tenant(
        &self,
        request: &HttpRequest,
        tenant_id: i64,
    ) -> ActixResult<HttpResponse> {
        finish(async {
            let storage = self.get_storage(request)?;
            // 仍有校区或用户时由外键约束转为 409
            if !storage.delete_tenant(tenant_id).await? {
                return Err(tenant_not_found());
            }
            evict_tenant(request, tenant_id).await;
            info!("Tenant {} deleted", tenant_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Tenant deleted successfully",
            )))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults_to_active() {
        let tenant = normalize(CreateTenantRequest {
            name: " Green Valley Schools ".to_string(),
            code: " green-valley ".to_string(),
            status: None,
        })
        .unwrap();
        assert_eq!(tenant.name, "Green Valley Schools");
        assert_eq!(tenant.code, "green-valley");
        assert_eq!(tenant.status, Some(TenantStatus::Active));
    }

    #[test]
    fn test_normalize_rejects_bad_code() {
        for code in ["G", "Green", "-gv", "gv_1"] {
            let req = CreateTenantRequest {
                name: "GV".to_string(),
                code: code.to_string(),
                status: None,
            };
            assert!(normalize(req).is_err(), "{code}");
        }
    }
}
