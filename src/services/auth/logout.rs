use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use crate::middlewares::require_jwt::{bearer_token, user_cache_key};
use crate::models::ApiResponse;
use crate::services::resolve_cache;
use crate::utils::jwt::JwtUtils;

/// 清除 refresh cookie 并移除缓存的用户
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let (Some(token), Some(cache)) = (bearer_token(request), resolve_cache(request)) {
        cache.remove(&user_cache_key(&token)).await;
        debug!("Evicted cached user for logged out token");
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
