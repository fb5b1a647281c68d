use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// 令牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,          // 用户 ID
    pub role: String,         // 用户角色
    pub tenant_id: Option<i64>, // 所属租户（超级管理员为空）
    pub token_type: TokenKind,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    /// 签发令牌
    pub fn generate_token(
        user_id: i64,
        role: &str,
        tenant_id: Option<i64>,
        kind: TokenKind,
        expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            tenant_id,
            token_type: kind,
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(Self::secret().as_bytes()),
        )
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
        tenant_id: Option<i64>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token(
            user_id,
            role,
            tenant_id,
            TokenKind::Access,
            Self::access_token_ttl(),
        )
    }

    // 生成 Refresh Token
    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        tenant_id: Option<i64>,
        remember_me: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_token(
            user_id,
            role,
            tenant_id,
            TokenKind::Refresh,
            Self::refresh_token_ttl(remember_me),
        )
    }

    pub fn access_token_ttl() -> chrono::Duration {
        chrono::Duration::minutes(AppConfig::get().jwt.access_token_expiry)
    }

    pub fn refresh_token_ttl(remember_me: bool) -> chrono::Duration {
        let config = &AppConfig::get().jwt;
        if remember_me {
            chrono::Duration::days(config.refresh_token_remember_me_expiry)
        } else {
            chrono::Duration::days(config.refresh_token_expiry)
        }
    }

    // 验证令牌并检查类型
    pub fn verify_token(
        token: &str,
        expected: TokenKind,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(Self::secret().as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token(token, TokenKind::Access)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token(token, TokenKind::Refresh)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(refresh_token: &str, remember_me: bool) -> Cookie<'static> {
        let max_age = Self::refresh_token_ttl(remember_me).num_seconds();
        Cookie::build(REFRESH_TOKEN_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(max_age))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_TOKEN_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_round_trip() {
        let token = JwtUtils::generate_access_token(7, "admin", Some(3)).unwrap();
        let claims = JwtUtils::verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.tenant_id, Some(3));
    }

    #[test]
    fn test_token_kind_is_enforced() {
        let refresh = JwtUtils::generate_refresh_token(7, "staff", Some(1), false).unwrap();
        assert!(JwtUtils::verify_access_token(&refresh).is_err());
        assert!(JwtUtils::verify_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = JwtUtils::generate_token(
            1,
            "super_admin",
            None,
            TokenKind::Access,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify_access_token(&token).is_err());
    }

    #[test]
    fn test_remember_me_extends_refresh_ttl() {
        assert!(JwtUtils::refresh_token_ttl(true) > JwtUtils::refresh_token_ttl(false));
    }
}
