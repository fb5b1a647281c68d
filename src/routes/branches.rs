use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::branches::requests::{
    BranchListParams, CreateBranchRequest, UpdateBranchRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::BranchService;
use crate::utils::SafeIDI64;

static BRANCH_SERVICE: Lazy<BranchService> = Lazy::new(BranchService::new_lazy);

pub async fn list_branches(
    req: HttpRequest,
    query: web::Query<BranchListParams>,
) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE.list_branches(&req, query.into_inner()).await
}

pub async fn create_branch(
    req: HttpRequest,
    branch_data: web::Json<CreateBranchRequest>,
) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE
        .create_branch(&req, branch_data.into_inner())
        .await
}

pub async fn get_branch(req: HttpRequest, branch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE.get_branch(&req, branch_id.0).await
}

pub async fn update_branch(
    req: HttpRequest,
    branch_id: SafeIDI64,
    update_data: web::Json<UpdateBranchRequest>,
) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE
        .update_branch(&req, branch_id.0, update_data.into_inner())
        .await
}

pub async fn delete_branch(req: HttpRequest, branch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE.delete_branch(&req, branch_id.0).await
}

// 校区按 X-Tenant-Id 解析租户，不经过校区作用域中间件
pub fn configure_branches_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/branches")
            .wrap(middlewares::RequireJWT)
            // 同租户的办公室与教师需要校区列表来选择 X-Branch-Id
            .route("", web::get().to(list_branches))
            .route("/{id}", web::get().to(get_branch))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_branch))
                    .route("/{id}", web::put().to(update_branch))
                    .route("/{id}", web::patch().to(update_branch))
                    .route("/{id}", web::delete().to(delete_branch)),
            ),
    );
}
