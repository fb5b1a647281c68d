use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{AuthService, ensure_active, issue_access_token};
use crate::config::AppConfig;
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::LoginResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::finish;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

fn login_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let storage = service.get_storage(request)?;
        let identifier = login_request.username.trim();

        // 1. 根据用户名或邮箱获取用户
        let Some(user) = storage.get_user_by_username_or_email(identifier).await? else {
            info!("Login failed for unknown identifier '{}'", identifier);
            return Err(login_failed());
        };

        // 2. 验证密码
        if !verify_password(&login_request.password, &user.password_hash) {
            info!("Login failed for user {}: wrong password", user.id);
            return Err(login_failed());
        }
        ensure_active(&user)?;

        // 3. 更新最后登录时间，失败不影响登录
        if let Err(e) = storage.update_last_login(user.id).await {
            warn!("Failed to update last login for user {}: {}", user.id, e);
        }

        // 4. 签发令牌对
        let access_token = issue_access_token(&user)?;
        let refresh_token = JwtUtils::generate_refresh_token(
            user.id,
            user.role.as_str(),
            user.tenant_id,
            login_request.remember_me,
        )
        .map_err(|e| {
            tracing::error!("Failed to generate refresh token: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                "Unable to generate token",
            ))
        })?;

        info!("User {} logged in", user.username);
        let refresh_cookie =
            JwtUtils::create_refresh_token_cookie(&refresh_token, login_request.remember_me);
        let response = LoginResponse {
            access_token,
            expires_in: AppConfig::get().jwt.access_token_expiry * 60,
            user,
            created_at: chrono::Utc::now(),
        };

        Ok(HttpResponse::Ok()
            .cookie(refresh_cookie)
            .json(ApiResponse::success(response, "Login successful")))
    })
    .await
}
