use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::UserListParams;
use crate::services::{current_user, finish, list_response};

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let actor = current_user(request)?;
        let storage = service.get_storage(request)?;

        // 租户管理员固定为本租户
        let tenant_scope = if actor.role.is_super_admin() {
            query.tenant_id
        } else {
            actor.tenant_id
        };
        let page = storage
            .list_users_with_pagination(tenant_scope, query)
            .await?;
        Ok(list_response(page, "User list retrieved successfully"))
    })
    .await
}
