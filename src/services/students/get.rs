use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_student(scope.branch_id, student_id).await? {
            Some(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student retrieved successfully",
            ))),
            None => Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        }
    })
    .await
}
