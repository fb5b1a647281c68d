use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, load_managed};
use crate::models::ApiResponse;
use crate::services::{current_user, finish};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let actor = current_user(request)?;
        let storage = service.get_storage(request)?;

        let user = load_managed(&storage, &actor, user_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "User information retrieved successfully",
        )))
    })
    .await
}
