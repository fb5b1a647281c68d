use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_subject(scope.branch_id, subject_id).await? {
            return Err(not_found(ErrorCode::SubjectNotFound, "Subject not found"));
        }
        info!("Subject {} deleted from branch {}", subject_id, scope.branch_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Subject deleted successfully",
        )))
    })
    .await
}
