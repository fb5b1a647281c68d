use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UserService, check_role_grant};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_reference, current_user, finish, invalid};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    optional_text, validate_email, validate_password_simple, validate_username,
};

/// 确定新用户所属租户：超级管理员无租户，
/// 其余角色由超级管理员显式指定或继承创建者的租户
pub(crate) fn resolve_tenant(
    actor: &User,
    role: UserRole,
    requested: Option<i64>,
) -> Result<Option<i64>, &'static str> {
    if role.is_super_admin() {
        return Ok(None);
    }
    if actor.role.is_super_admin() {
        return requested
            .map(Some)
            .ok_or("tenant_id is required for tenant users");
    }
    actor
        .tenant_id
        .map(Some)
        .ok_or("Current user does not belong to a tenant")
}

fn normalize(req: CreateUserRequest) -> Result<CreateUserRequest, String> {
    let username = req.username.trim().to_string();
    validate_username(&username)?;
    let email = req.email.trim().to_lowercase();
    validate_email(&email)?;
    validate_password_simple(&req.password)?;

    Ok(CreateUserRequest {
        username,
        email,
        display_name: optional_text(req.display_name),
        ..req
    })
}

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let actor = current_user(request)?;
        let storage = service.get_storage(request)?;

        let user_data = normalize(user_data).map_err(invalid)?;
        check_role_grant(&actor, user_data.role)?;
        let tenant_id =
            resolve_tenant(&actor, user_data.role, user_data.tenant_id).map_err(invalid)?;
        if let Some(tenant_id) = tenant_id
            && storage.get_tenant_by_id(tenant_id).await?.is_none()
        {
            return Err(bad_reference(
                ErrorCode::TenantNotFound,
                format!("Tenant {tenant_id} does not exist"),
            ));
        }

        let password = hash_password(&user_data.password)?;
        // 用户名或邮箱重复由唯一约束转为 409
        let user = storage
            .create_user(CreateUserRequest {
                password,
                tenant_id,
                ..user_data
            })
            .await?;
        info!(
            "User {} ({}) created by user {}",
            user.username, user.role, actor.id
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::users::tests::user;

    #[test]
    fn test_resolve_tenant() {
        let root = user(1, UserRole::SuperAdmin, None);
        let admin = user(2, UserRole::Admin, Some(5));

        assert_eq!(resolve_tenant(&root, UserRole::SuperAdmin, Some(5)), Ok(None));
        assert_eq!(resolve_tenant(&root, UserRole::Admin, Some(7)), Ok(Some(7)));
        assert!(resolve_tenant(&root, UserRole::Staff, None).is_err());
        // 租户管理员忽略请求中的 tenant_id
        assert_eq!(resolve_tenant(&admin, UserRole::Teacher, Some(9)), Ok(Some(5)));
    }

    #[test]
    fn test_normalize_user() {
        let req = CreateUserRequest {
            username: " teacher_01 ".to_string(),
            email: " T.One@School.EDU ".to_string(),
            password: "Str0ngPass".to_string(),
            role: UserRole::Teacher,
            tenant_id: None,
            display_name: Some(" ".to_string()),
        };
        let normalized = normalize(req.clone()).unwrap();
        assert_eq!(normalized.username, "teacher_01");
        assert_eq!(normalized.email, "t.one@school.edu");
        assert_eq!(normalized.display_name, None);

        let weak = CreateUserRequest {
            password: "password".to_string(),
            ..req
        };
        assert!(normalize(weak).is_err());
    }
}
