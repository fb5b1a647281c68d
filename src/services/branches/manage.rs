use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{BranchService, branch_not_found, request_tenant};
use crate::middlewares::require_branch::branch_cache_key;
use crate::models::ApiResponse;
use crate::models::branches::requests::{BranchListParams, UpdateBranchRequest};
use crate::services::{finish, invalid, list_response, resolve_cache};
use crate::utils::validate::{optional_text, require_text, validate_code, validate_phone};

async fn evict_branch(request: &HttpRequest, branch_id: i64) {
    if let Some(cache) = resolve_cache(request) {
        cache.remove(&branch_cache_key(branch_id)).await;
    }
}

fn normalize(req: UpdateBranchRequest) -> Result<UpdateBranchRequest, String> {
    let code = req.code.map(|c| c.trim().to_string());
    if let Some(code) = &code {
        validate_code(code)?;
    }
    let phone = req.phone.map(optional_text);
    if let Some(Some(phone)) = &phone {
        validate_phone(phone)?;
    }
    Ok(UpdateBranchRequest {
        name: req
            .name
            .map(|n| require_text("name", &n, 128))
            .transpose()?,
        code,
        address: req.address.map(optional_text),
        phone,
    })
}

pub async fn list_branches(
    service: &BranchService,
    request: &HttpRequest,
    query: BranchListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let tenant_id = request_tenant(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_branches_with_pagination(tenant_id, query)
            .await?;
        Ok(list_response(page, "Branch list retrieved successfully"))
    })
    .await
}

pub async fn get_branch(
    service: &BranchService,
    request: &HttpRequest,
    branch_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let tenant_id = request_tenant(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_branch(tenant_id, branch_id).await? {
            Some(branch) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                branch,
                "Branch retrieved successfully",
            ))),
            None => Err(branch_not_found()),
        }
    })
    .await
}

pub async fn update_branch(
    service: &BranchService,
    request: &HttpRequest,
    branch_id: i64,
    update_data: UpdateBranchRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let tenant_id = request_tenant(request)?;
        let storage = service.get_storage(request)?;

        let update_data = normalize(update_data).map_err(invalid)?;
        let branch = storage
            .update_branch(tenant_id, branch_id, update_data)
            .await?
            .ok_or_else(branch_not_found)?;
        evict_branch(request, branch_id).await;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            branch,
            "Branch updated successfully",
        )))
    })
    .await
}

pub async fn delete_branch(
    service: &BranchService,
    request: &HttpRequest,
    branch_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let tenant_id = request_tenant(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_branch(tenant_id, branch_id).await? {
            return Err(branch_not_found());
        }
        evict_branch(request, branch_id).await;
        info!("Branch {} deleted from tenant {}", branch_id, tenant_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Branch deleted successfully",
        )))
    })
    .await
}
