pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::services::{forbidden, not_found};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }
}

pub(crate) fn user_not_found() -> HttpResponse {
    not_found(ErrorCode::UserNotFound, "User not found")
}

/// 超级管理员可见全部用户，租户管理员只可见本租户用户
pub(crate) fn can_manage(actor: &User, target: &User) -> bool {
    actor.role.is_super_admin() || target.tenant_id.is_some_and(|t| actor.can_access_tenant(t))
}

/// 只有超级管理员能授予超级管理员角色
pub(crate) fn check_role_grant(actor: &User, role: UserRole) -> Result<(), HttpResponse> {
    if role.is_super_admin() && !actor.role.is_super_admin() {
        return Err(forbidden(
            ErrorCode::Forbidden,
            "Only super admins can grant the super_admin role",
        ));
    }
    Ok(())
}

/// 按用户可见范围加载，不可见的用户按不存在处理
pub(crate) async fn load_managed(
    storage: &Arc<dyn Storage>,
    actor: &User,
    user_id: i64,
) -> Result<User, HttpResponse> {
    match storage.get_user_by_id(user_id).await? {
        Some(user) if can_manage(actor, &user) => Ok(user),
        _ => Err(user_not_found()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;
    use chrono::Utc;

    pub(crate) fn user(id: i64, role: UserRole, tenant_id: Option<i64>) -> User {
        User {
            id,
            tenant_id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_visibility() {
        let root = user(1, UserRole::SuperAdmin, None);
        let admin = user(2, UserRole::Admin, Some(5));
        let staff = user(3, UserRole::Staff, Some(5));
        let other = user(4, UserRole::Teacher, Some(6));

        assert!(can_manage(&root, &other));
        assert!(can_manage(&root, &admin));
        assert!(can_manage(&admin, &staff));
        assert!(!can_manage(&admin, &other));
        assert!(!can_manage(&admin, &root));
    }

    #[test]
    fn test_only_super_admin_grants_super_admin() {
        let root = user(1, UserRole::SuperAdmin, None);
        let admin = user(2, UserRole::Admin, Some(5));
        assert!(check_role_grant(&root, UserRole::SuperAdmin).is_ok());
        assert!(check_role_grant(&admin, UserRole::SuperAdmin).is_err());
        assert!(check_role_grant(&admin, UserRole::Teacher).is_ok());
    }
}
