/*!
 * 基于角色的访问控制中间件
 *
 * 必须位于 RequireJWT 之内（即先于它 `.wrap`），用于验证当前用户的角色。
 *
 * ```rust,ignore
 * web::scope("/api/v1/tenants")
 *     .wrap(RequireRole::new_any(UserRole::platform_roles()))
 *     .wrap(RequireJWT)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<UserRole>,
}

impl RequireRole {
    pub fn new(role: &UserRole) -> Self {
        Self {
            required_roles: vec![*role],
        }
    }

    /// 任一角色即可
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| **r).collect(),
        }
    }

    fn permits(required: &[UserRole], role: UserRole) -> bool {
        required.contains(&role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_roles: Vec<UserRole>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required_roles = self.required_roles.clone();

        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let user = req.extensions().get::<User>().cloned();

            match user {
                Some(user) if RequireRole::permits(&required_roles, user.role) => {
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Some(user) => {
                    info!(
                        "Access denied for user {} (role: {}). Required roles: {:?}",
                        user.id, user.role, required_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!("Role check failed: no authenticated user on request to {}", req.path());
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_groups_permit() {
        let office = RequireRole::new_any(UserRole::office_roles());
        assert!(RequireRole::permits(&office.required_roles, UserRole::Staff));
        assert!(RequireRole::permits(&office.required_roles, UserRole::SuperAdmin));
        assert!(!RequireRole::permits(&office.required_roles, UserRole::Teacher));

        let platform = RequireRole::new(&UserRole::SuperAdmin);
        assert!(!RequireRole::permits(&platform.required_roles, UserRole::Admin));
    }
}
