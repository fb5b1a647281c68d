use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AuthService, ensure_active, issue_access_token};
use crate::config::AppConfig;
use crate::models::auth::responses::RefreshTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::finish;
use crate::utils::jwt::JwtUtils;

fn invalid_refresh(message: &str) -> HttpResponse {
    // 同时清除失效的 cookie
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::InvalidRefreshToken,
            message,
        ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let storage = service.get_storage(request)?;

        let token = JwtUtils::extract_refresh_token_from_cookie(request)
            .ok_or_else(|| invalid_refresh("Unauthorized access, please login"))?;
        let claims = JwtUtils::verify_refresh_token(&token).map_err(|e| {
            info!("Refresh token rejected: {}", e);
            invalid_refresh("Login expired or invalid, please login again")
        })?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| invalid_refresh("Login expired or invalid, please login again"))?;

        // 重新加载用户，角色或状态可能已变化
        let user = storage
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| invalid_refresh("Login expired or invalid, please login again"))?;
        ensure_active(&user)?;

        let response = RefreshTokenResponse {
            access_token: issue_access_token(&user)?,
            expires_in: AppConfig::get().jwt.access_token_expiry * 60,
        };
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Token refreshed successfully",
        )))
    })
    .await
}
