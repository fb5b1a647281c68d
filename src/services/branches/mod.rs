pub mod create;
pub mod manage;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_branch::{HeaderId, parse_id_header};
use crate::models::ErrorCode;
use crate::models::branches::requests::{
    BranchListParams, CreateBranchRequest, UpdateBranchRequest,
};
use crate::models::users::entities::User;
use crate::services::{bad_reference, current_user, forbidden, not_found};
use crate::storage::Storage;

pub const TENANT_HEADER: &str = "X-Tenant-Id";

pub struct BranchService {
    storage: Option<Arc<dyn Storage>>,
}

impl BranchService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_branches(
        &self,
        request: &HttpRequest,
        query: BranchListParams,
    ) -> ActixResult<HttpResponse> {
        manage::list_branches(self, request, query).await
    }

    pub async fn create_branch(
        &self,
        request: &HttpRequest,
        branch_data: CreateBranchRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_branch(self, request, branch_data).await
    }

    pub async fn get_branch(
        &self,
        request: &HttpRequest,
        branch_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_branch(self, request, branch_id).await
    }

    pub async fn update_branch(
        &self,
        request: &HttpRequest,
        branch_id: i64,
        update_data: UpdateBranchRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_branch(self, request, branch_id, update_data).await
    }

    pub async fn delete_branch(
        &self,
        request: &HttpRequest,
        branch_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_branch(self, request, branch_id).await
    }
}

pub(crate) fn branch_not_found() -> HttpResponse {
    not_found(ErrorCode::BranchNotFound, "Branch not found")
}

/// 按 `X-Tenant-Id` 与当前用户确定操作的租户
///
/// 超级管理员必须指定；其他用户可省略（取自身租户），指定时须与自身租户一致。
pub(crate) fn tenant_for(user: &User, header: HeaderId) -> Result<i64, HttpResponse> {
    match (header, user.role.is_super_admin(), user.tenant_id) {
        (HeaderId::Invalid, _, _) => Err(bad_reference(
            ErrorCode::TenantHeaderInvalid,
            "X-Tenant-Id must be a positive integer",
        )),
        (HeaderId::Valid(id), true, _) => Ok(id),
        (HeaderId::Missing, true, _) => Err(bad_reference(
            ErrorCode::TenantHeaderInvalid,
            "X-Tenant-Id is required for super admins",
        )),
        (HeaderId::Valid(id), false, Some(own)) if id == own => Ok(own),
        (HeaderId::Missing, false, Some(own)) => Ok(own),
        (HeaderId::Valid(_), false, Some(_)) => Err(forbidden(
            ErrorCode::TenantMismatch,
            "X-Tenant-Id does not match your tenant",
        )),
        (_, false, None) => Err(forbidden(
            ErrorCode::Forbidden,
            "Current user does not belong to a tenant",
        )),
    }
}

pub(crate) fn request_tenant(request: &HttpRequest) -> Result<i64, HttpResponse> {
    let user = current_user(request)?;
    let header = request
        .headers()
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok());
    tenant_for(&user, parse_id_header(header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::users::tests::user;
    use actix_web::http::StatusCode;

    #[test]
    fn test_tenant_resolution() {
        let root = user(1, UserRole::SuperAdmin, None);
        let admin = user(2, UserRole::Admin, Some(5));

        assert_eq!(tenant_for(&root, HeaderId::Valid(9)).ok(), Some(9));
        assert_eq!(
            tenant_for(&root, HeaderId::Missing).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );

        assert_eq!(tenant_for(&admin, HeaderId::Missing).ok(), Some(5));
        assert_eq!(tenant_for(&admin, HeaderId::Valid(5)).ok(), Some(5));
        assert_eq!(
            tenant_for(&admin, HeaderId::Valid(6)).unwrap_err().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            tenant_for(&admin, HeaderId::Invalid).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
