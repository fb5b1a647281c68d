//! 业务逻辑层
//!
//! 每类资源一个 `XxxService`，按操作拆分文件。服务持有可选的存储句柄，
//! 未注入时从 `app_data` 中解析。所有操作最终返回 `HttpResponse`，
//! 业务失败以 `Err(HttpResponse)` 在内部短路，由 [`finish`] 统一收口。

pub mod attendance;
pub mod auth;
pub mod branches;
pub mod campaigns;
pub mod classes;
pub mod dashboard;
pub mod enrollments;
pub mod exams;
pub mod fee_structures;
pub mod invoices;
pub mod marks;
pub mod messages;
pub mod payments;
mod references;
pub mod sections;
pub mod students;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod tenants;
pub mod timetables;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use branches::BranchService;
pub use campaigns::CampaignService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use enrollments::EnrollmentService;
pub use exams::ExamService;
pub use fee_structures::FeeStructureService;
pub use invoices::InvoiceService;
pub use marks::MarkService;
pub use messages::MessageService;
pub use payments::PaymentService;
pub use sections::SectionService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use tenants::TenantService;
pub use timetables::TimetableService;
pub use users::UserService;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use serde::Serialize;
use tracing::error;
use ts_rs::TS;

use crate::cache::ObjectCache;
use crate::errors::SchoolError;
use crate::middlewares::{BranchScope, RequireBranch, RequireJWT};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode, PaginatedResponse};
use crate::storage::Storage;
use crate::utils::validate::DATE_FORMAT;

/// 服务内部结果，`Err` 分支已是可直接返回的响应
pub(crate) type ServiceResult = Result<HttpResponse, HttpResponse>;

pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

impl From<SchoolError> for HttpResponse {
    fn from(err: SchoolError) -> Self {
        let code = match &err {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => ErrorCode::ValidationFailed,
            SchoolError::NotFound(_) => ErrorCode::NotFound,
            SchoolError::Conflict(_) => ErrorCode::Conflict,
            SchoolError::Authentication(_) => ErrorCode::Unauthorized,
            SchoolError::Authorization(_) | SchoolError::TenantScope(_) => ErrorCode::Forbidden,
            _ => ErrorCode::InternalServerError,
        };
        if err.is_internal() {
            error!("{}", err.format_simple());
            return reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                "Internal server error",
            );
        }
        reject(err.status_code(), code, err.message())
    }
}

pub(crate) fn reject(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::<()>::error_empty(code, message))
}

/// 400 参数校验失败
pub(crate) fn invalid(message: impl Into<String>) -> HttpResponse {
    reject(StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed, message)
}

/// 请求体中引用的记录不在当前校区
pub(crate) fn bad_reference(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    reject(StatusCode::BAD_REQUEST, code, message)
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    reject(StatusCode::NOT_FOUND, code, message)
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    reject(StatusCode::CONFLICT, code, message)
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    reject(StatusCode::FORBIDDEN, code, message)
}

pub(crate) async fn finish<F>(operation: F) -> ActixResult<HttpResponse>
where
    F: Future<Output = ServiceResult>,
{
    Ok(operation.await.unwrap_or_else(|response| response))
}

/// 列表响应，附带 `X-Total-Count`
pub(crate) fn list_response<T: TS + Serialize>(
    page: PaginatedResponse<T>,
    message: &str,
) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, page.pagination.total.to_string()))
        .json(ApiResponse::success(page, message))
}

pub(crate) fn branch_scope(request: &HttpRequest) -> Result<BranchScope, HttpResponse> {
    RequireBranch::extract_scope(request).ok_or_else(|| {
        reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::BranchHeaderMissing,
            "Branch scope is required",
        )
    })
}

pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        reject(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Authentication required",
        )
    })
}

/// 优先使用注入的存储，否则从 `app_data` 解析
pub(crate) fn resolve_storage(
    injected: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> Result<Arc<dyn Storage>, HttpResponse> {
    if let Some(storage) = injected {
        return Ok(storage.clone());
    }
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Internal server error",
            )
        })
}

pub(crate) fn resolve_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 当天日期 `YYYY-MM-DD`（UTC）
pub(crate) fn today() -> String {
    chrono::Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_validation_error_maps_to_400() {
        let response: HttpResponse = SchoolError::validation("capacity out of range").into();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::ValidationFailed as i32);
        assert_eq!(json["message"], "capacity out of range");
    }

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let response: HttpResponse = SchoolError::database_operation("disk I/O error").into();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Internal server error");
    }

    #[test]
    fn test_conflict_and_scope_statuses() {
        let response: HttpResponse = SchoolError::conflict("duplicate").into();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let response: HttpResponse = SchoolError::tenant_scope("other tenant").into();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_list_response_sets_total_header() {
        let page = PaginatedResponse::new(vec![1_i32, 2], 1, 2, 7);
        let response = list_response(page, "ok");
        assert_eq!(
            response
                .headers()
                .get(TOTAL_COUNT_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("7")
        );
    }
}
