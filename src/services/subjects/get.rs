use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_subject(scope.branch_id, subject_id).await? {
            Some(subject) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                subject,
                "Subject retrieved successfully",
            ))),
            None => Err(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        }
    })
    .await
}
