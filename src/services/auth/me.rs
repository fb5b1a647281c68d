use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::auth::responses::UserInfoResponse;
use crate::services::{current_user, finish};

pub async fn handle_me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    finish(async {
        let user = current_user(request)?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        )))
    })
    .await
}
