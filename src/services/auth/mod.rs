pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::requests::LoginRequest;
use crate::models::users::entities::{User, UserStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        refresh::handle_refresh_token(self, request).await
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(request).await
    }

    // 当前登录用户
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::handle_me(request).await
    }
}

/// 非活跃用户不能登录或续期
pub(crate) fn ensure_active(user: &User) -> Result<(), HttpResponse> {
    if user.status == UserStatus::Active {
        return Ok(());
    }
    Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
        ErrorCode::UserInactive,
        format!("User account is {}", user.status),
    )))
}

pub(crate) fn issue_access_token(user: &User) -> Result<String, HttpResponse> {
    JwtUtils::generate_access_token(user.id, user.role.as_str(), user.tenant_id).map_err(|e| {
        tracing::error!("Failed to generate access token for user {}: {}", user.id, e);
        HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
            ErrorCode::InternalServerError,
            "Unable to generate token",
        ))
    })
}
