use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UserService, load_managed, user_not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, finish, reject};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let actor = current_user(request)?;
        let storage = service.get_storage(request)?;

        if actor.id == user_id {
            return Err(reject(
                actix_web::http::StatusCode::BAD_REQUEST,
                ErrorCode::CanNotDeleteCurrentUser,
                "Cannot delete current user",
            ));
        }
        load_managed(&storage, &actor, user_id).await?;

        if !storage.delete_user(user_id).await? {
            return Err(user_not_found());
        }
        info!("User {} deleted by user {}", user_id, actor.id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("User deleted successfully")))
    })
    .await
}
