use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UserService, check_role_grant, load_managed, user_not_found};
use crate::models::ApiResponse;
use crate::models::users::requests::UpdateUserRequest;
use crate::services::{current_user, finish, invalid};
use crate::utils::password::hash_password;
use crate::utils::validate::{optional_text, validate_email, validate_password_simple};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let actor = current_user(request)?;
        let storage = service.get_storage(request)?;

        let target = load_managed(&storage, &actor, user_id).await?;
        if let Some(role) = update_data.role {
            check_role_grant(&actor, role)?;
            // 租户用户与平台用户之间不能互转
            if role.is_super_admin() != target.role.is_super_admin() {
                return Err(invalid("Cannot move a user between platform and tenant roles"));
            }
        }

        let email = match update_data.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                validate_email(&email).map_err(invalid)?;
                Some(email)
            }
            None => None,
        };
        let password = match update_data.password {
            Some(password) => {
                validate_password_simple(&password).map_err(invalid)?;
                Some(hash_password(&password)?)
            }
            None => None,
        };

        let update_data = UpdateUserRequest {
            email,
            password,
            display_name: update_data.display_name.map(optional_text),
            ..update_data
        };
        match storage.update_user(user_id, update_data).await? {
            Some(user) => {
                info!("User {} updated by user {}", user.id, actor.id);
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    user,
                    "User updated successfully",
                )))
            }
            None => Err(user_not_found()),
        }
    })
    .await
}
