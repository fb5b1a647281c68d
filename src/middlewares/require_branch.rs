/*!
 * 校区作用域中间件
 *
 * 必须位于 RequireJWT 之内。根据 `X-Branch-Id`（以及可选的 `X-Tenant-Id`）请求头
 * 确定当前校区，校验当前用户能否访问该校区所属租户，并把 [`BranchScope`]
 * 写入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireBranch)
 *     .wrap(RequireJWT)
 * ```
 *
 * 处理程序通过 `RequireBranch::extract_scope(&req)` 取得作用域，所有存储调用
 * 都以其中的 `branch_id` 过滤。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::{
    ErrorCode,
    branches::entities::Branch,
    tenants::entities::{Tenant, TenantStatus},
    users::entities::User,
};
use crate::storage::Storage;

use super::create_error_response;

/// 当前请求的租户与校区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchScope {
    pub tenant_id: i64,
    pub branch_id: i64,
}

pub fn branch_cache_key(branch_id: i64) -> String {
    format!("branch:{branch_id}")
}

pub fn tenant_cache_key(tenant_id: i64) -> String {
    format!("tenant:{tenant_id}")
}

/// ID 类请求头的解析结果
#[derive(Debug, PartialEq, Eq)]
pub enum HeaderId {
    Missing,
    Invalid,
    Valid(i64),
}

/// 解析正整数 ID 请求头
pub fn parse_id_header(value: Option<&str>) -> HeaderId {
    match value.map(str::trim) {
        None | Some("") => HeaderId::Missing,
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) if id > 0 => HeaderId::Valid(id),
            _ => HeaderId::Invalid,
        },
    }
}

struct Rejection {
    status: StatusCode,
    code: ErrorCode,
    message: String,
}

impl Rejection {
    fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn internal(reason: &str) -> Self {
        error!("Branch scope resolution failed: {}", reason);
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            "Internal server error",
        )
    }
}

async fn load_branch(
    cache: &Arc<dyn ObjectCache>,
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    ttl: u64,
) -> Result<Option<Branch>, Rejection> {
    let key = branch_cache_key(branch_id);
    if let CacheResult::Found(branch) = cache.get_json::<Branch>(&key).await {
        return Ok(Some(branch));
    }

    let branch = storage
        .get_branch_by_id(branch_id)
        .await
        .map_err(|e| Rejection::internal(&e.to_string()))?;
    if let Some(ref branch) = branch {
        cache.insert_json(key, branch, ttl).await;
    }
    Ok(branch)
}

async fn load_tenant(
    cache: &Arc<dyn ObjectCache>,
    storage: &Arc<dyn Storage>,
    tenant_id: i64,
    ttl: u64,
) -> Result<Option<Tenant>, Rejection> {
    let key = tenant_cache_key(tenant_id);
    if let CacheResult::Found(tenant) = cache.get_json::<Tenant>(&key).await {
        return Ok(Some(tenant));
    }

    let tenant = storage
        .get_tenant_by_id(tenant_id)
        .await
        .map_err(|e| Rejection::internal(&e.to_string()))?;
    if let Some(ref tenant) = tenant {
        cache.insert_json(key, tenant, ttl).await;
    }
    Ok(tenant)
}

async fn resolve_scope(req: &ServiceRequest) -> Result<BranchScope, Rejection> {
    let tenancy = &AppConfig::get().tenancy;
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let branch_id = match parse_id_header(header(&tenancy.branch_header).as_deref()) {
        HeaderId::Valid(id) => id,
        HeaderId::Missing => {
            return Err(Rejection::new(
                StatusCode::BAD_REQUEST,
                ErrorCode::BranchHeaderMissing,
                format!("Missing {} header", tenancy.branch_header),
            ));
        }
        HeaderId::Invalid => {
            return Err(Rejection::new(
                StatusCode::BAD_REQUEST,
                ErrorCode::BranchHeaderInvalid,
                format!("{} must be a positive integer", tenancy.branch_header),
            ));
        }
    };

    let requested_tenant = match parse_id_header(header(&tenancy.tenant_header).as_deref()) {
        HeaderId::Valid(id) => Some(id),
        HeaderId::Missing => None,
        HeaderId::Invalid => {
            return Err(Rejection::new(
                StatusCode::BAD_REQUEST,
                ErrorCode::TenantHeaderInvalid,
                format!("{} must be a positive integer", tenancy.tenant_header),
            ));
        }
    };

    let user = req
        .extensions()
        .get::<User>()
        .cloned()
        .ok_or_else(|| {
            Rejection::new(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Authentication required",
            )
        })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone())
        .ok_or_else(|| Rejection::internal("cache not configured"))?;
    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| Rejection::internal("storage not configured"))?;

    let ttl = tenancy.branch_cache_ttl;
    let branch = load_branch(&cache, &storage, branch_id, ttl)
        .await?
        .ok_or_else(|| {
            Rejection::new(
                StatusCode::NOT_FOUND,
                ErrorCode::BranchNotFound,
                "Branch not found",
            )
        })?;

    if requested_tenant.is_some_and(|tenant_id| tenant_id != branch.tenant_id) {
        return Err(Rejection::new(
            StatusCode::FORBIDDEN,
            ErrorCode::TenantMismatch,
            "Branch does not belong to the requested tenant",
        ));
    }

    if !user.can_access_tenant(branch.tenant_id) {
        info!(
            "User {} denied access to branch {} of tenant {}",
            user.id, branch.id, branch.tenant_id
        );
        return Err(Rejection::new(
            StatusCode::FORBIDDEN,
            ErrorCode::TenantMismatch,
            "No access to this branch",
        ));
    }

    let tenant = load_tenant(&cache, &storage, branch.tenant_id, ttl)
        .await?
        .ok_or_else(|| Rejection::internal("branch references a missing tenant"))?;
    if tenant.status == TenantStatus::Suspended {
        return Err(Rejection::new(
            StatusCode::FORBIDDEN,
            ErrorCode::TenantSuspended,
            "Tenant is suspended",
        ));
    }

    Ok(BranchScope {
        tenant_id: branch.tenant_id,
        branch_id: branch.id,
    })
}

#[derive(Clone)]
pub struct RequireBranch;

impl<S, B> Transform<S, ServiceRequest> for RequireBranch
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireBranchMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireBranchMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireBranchMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireBranchMiddleware<S>
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
        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            match resolve_scope(&req).await {
                Ok(scope) => {
                    debug!(
                        "Request to {} scoped to tenant {} branch {}",
                        req.path(),
                        scope.tenant_id,
                        scope.branch_id
                    );
                    req.extensions_mut().insert(scope);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(rejection) => Ok(req.into_response(
                    create_error_response(rejection.status, rejection.code, &rejection.message)
                        .map_into_right_body(),
                )),
            }
        })
    }
}

impl RequireBranch {
    /// 当前请求的校区作用域，须在 RequireBranch 之后调用
    pub fn extract_scope(req: &actix_web::HttpRequest) -> Option<BranchScope> {
        req.extensions().get::<BranchScope>().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::{
        branches::requests::CreateBranchRequest,
        tenants::requests::{CreateTenantRequest, UpdateTenantRequest},
        users::entities::{UserRole, UserStatus},
    };
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpRequest, HttpResponse};
    use chrono::Utc;

    fn user(role: UserRole, tenant_id: Option<i64>) -> User {
        User {
            id: 1,
            tenant_id,
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn scoped(req: HttpRequest) -> HttpResponse {
        match RequireBranch::extract_scope(&req) {
            Some(scope) => HttpResponse::Ok().body(format!("{}:{}", scope.tenant_id, scope.branch_id)),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    struct Seed {
        storage: Arc<dyn Storage>,
        tenant: i64,
        branch: i64,
        suspended_branch: i64,
    }

    async fn seed() -> Seed {
        let storage: Arc<dyn Storage> =
            Arc::new(SeaOrmStorage::in_memory().await.expect("storage"));

        let mut ids = Vec::new();
        for code in ["alpha", "beta"] {
            let tenant = storage
                .create_tenant(CreateTenantRequest {
                    name: code.to_string(),
                    code: code.to_string(),
                    status: None,
                })
                .await
                .expect("tenant");
            let branch = storage
                .create_branch(
                    tenant.id,
                    CreateBranchRequest {
                        name: format!("{code} main"),
                        code: "main".to_string(),
                        address: None,
                        phone: None,
                    },
                )
                .await
                .expect("branch");
            ids.push((tenant.id, branch.id));
        }
        storage
            .update_tenant(
                ids[1].0,
                UpdateTenantRequest {
                    name: None,
                    status: Some(TenantStatus::Suspended),
                },
            )
            .await
            .expect("suspend");

        Seed {
            storage,
            tenant: ids[0].0,
            branch: ids[0].1,
            suspended_branch: ids[1].1,
        }
    }

    async fn call(seed: &Seed, current: User, headers: &[(&str, String)]) -> (StatusCode, String) {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(64, 60));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(seed.storage.clone()))
                .app_data(web::Data::new(cache))
                .service(
                    web::scope("/api")
                        .wrap(RequireBranch)
                        .wrap_fn(move |req, srv| {
                            req.extensions_mut().insert(current.clone());
                            srv.call(req)
                        })
                        .route("/scoped", web::get().to(scoped)),
                ),
        )
        .await;

        let mut req = actix_test::TestRequest::get().uri("/api/scoped");
        for (name, value) in headers {
            req = req.insert_header((*name, value.clone()));
        }
        let resp = actix_test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body = actix_test::read_body(resp).await;
        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[test]
    fn test_parse_id_header() {
        assert_eq!(parse_id_header(None), HeaderId::Missing);
        assert_eq!(parse_id_header(Some("  ")), HeaderId::Missing);
        assert_eq!(parse_id_header(Some("12")), HeaderId::Valid(12));
        assert_eq!(parse_id_header(Some(" 7 ")), HeaderId::Valid(7));
        assert_eq!(parse_id_header(Some("0")), HeaderId::Invalid);
        assert_eq!(parse_id_header(Some("-3")), HeaderId::Invalid);
        assert_eq!(parse_id_header(Some("abc")), HeaderId::Invalid);
    }

    #[actix_web::test]
    async fn test_scope_resolved_for_tenant_member() {
        let seed = seed().await;
        let (status, body) = call(
            &seed,
            user(UserRole::Staff, Some(seed.tenant)),
            &[("X-Branch-Id", seed.branch.to_string())],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{}:{}", seed.tenant, seed.branch));
    }

    #[actix_web::test]
    async fn test_missing_and_invalid_headers() {
        let seed = seed().await;
        let staff = user(UserRole::Staff, Some(seed.tenant));

        let (status, _) = call(&seed, staff.clone(), &[]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&seed, staff.clone(), &[("X-Branch-Id", "abc".to_string())]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &seed,
            staff,
            &[
                ("X-Branch-Id", seed.branch.to_string()),
                ("X-Tenant-Id", "x".to_string()),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_branch_is_not_found() {
        let seed = seed().await;
        let (status, _) = call(
            &seed,
            user(UserRole::SuperAdmin, None),
            &[("X-Branch-Id", "9999".to_string())],
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_cross_tenant_access_forbidden() {
        let seed = seed().await;

        // 其他租户的用户
        let (status, _) = call(
            &seed,
            user(UserRole::Admin, Some(seed.tenant + 100)),
            &[("X-Branch-Id", seed.branch.to_string())],
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // 请求头中的租户与校区不一致
        let (status, _) = call(
            &seed,
            user(UserRole::SuperAdmin, None),
            &[
                ("X-Branch-Id", seed.branch.to_string()),
                ("X-Tenant-Id", (seed.tenant + 1).to_string()),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_suspended_tenant_forbidden() {
        let seed = seed().await;
        let (status, body) = call(
            &seed,
            user(UserRole::SuperAdmin, None),
            &[("X-Branch-Id", seed.suspended_branch.to_string())],
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("suspended"));
    }
}
