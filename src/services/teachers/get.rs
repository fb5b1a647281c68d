use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_teacher(scope.branch_id, teacher_id).await? {
            Some(teacher) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher retrieved successfully",
            ))),
            None => Err(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        }
    })
    .await
}
