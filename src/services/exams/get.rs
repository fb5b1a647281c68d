use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, exam_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_exam(scope.branch_id, exam_id).await? {
            Some(exam) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                exam,
                "Exam retrieved successfully",
            ))),
            None => Err(exam_not_found()),
        }
    })
    .await
}
