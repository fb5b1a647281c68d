use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_student(scope.branch_id, student_id).await? {
            return Err(not_found(ErrorCode::StudentNotFound, "Student not found"));
        }
        info!("Student {} deleted from branch {}", student_id, scope.branch_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Student deleted successfully",
        )))
    })
    .await
}
