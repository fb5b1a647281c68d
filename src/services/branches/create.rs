use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{BranchService, request_tenant};
use crate::models::branches::requests::CreateBranchRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_reference, finish, invalid};
use crate::utils::validate::{optional_text, require_text, validate_code, validate_phone};

pub(crate) fn normalize(req: CreateBranchRequest) -> Result<CreateBranchRequest, String> {
    let code = req.code.trim().to_string();
    validate_code(&code)?;
    let phone = optional_text(req.phone);
    if let Some(phone) = &phone {
        validate_phone(phone)?;
    }
    Ok(CreateBranchRequest {
        name: require_text("name", &req.name, 128)?,
        code,
        address: optional_text(req.address),
        phone,
    })
}

pub async fn create_branch(
    service: &BranchService,
    request: &HttpRequest,
    branch_data: CreateBranchRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let tenant_id = request_tenant(request)?;
        let storage = service.get_storage(request)?;

        let branch_data = normalize(branch_data).map_err(invalid)?;
        if storage.get_tenant_by_id(tenant_id).await?.is_none() {
            return Err(bad_reference(
                ErrorCode::TenantNotFound,
                format!("Tenant {tenant_id} does not exist"),
            ));
        }

        // 租户内编码重复由唯一约束转为 409
        let branch = storage.create_branch(tenant_id, branch_data).await?;
        info!(
            "Branch {} ({}) created for tenant {}",
            branch.id, branch.code, tenant_id
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            branch,
            "Branch created successfully",
        )))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_branch() {
        let branch = normalize(CreateBranchRequest {
            name: " North Campus ".to_string(),
            code: "north".to_string(),
            address: Some("  ".to_string()),
            phone: Some(" +91 80 1234 5678 ".to_string()),
        })
        .unwrap();
        assert_eq!(branch.name, "North Campus");
        assert_eq!(branch.address, None);
        assert_eq!(branch.phone.as_deref(), Some("+91 80 1234 5678"));

        assert!(
            normalize(CreateBranchRequest {
                name: "North".to_string(),
                code: "North Campus".to_string(),
                address: None,
                phone: None,
            })
            .is_err()
        );
    }
}
