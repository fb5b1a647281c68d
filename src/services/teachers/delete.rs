use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_teacher(scope.branch_id, teacher_id).await? {
            return Err(not_found(ErrorCode::TeacherNotFound, "Teacher not found"));
        }
        info!("Teacher {} deleted from branch {}", teacher_id, scope.branch_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Teacher deleted successfully",
        )))
    })
    .await
}
