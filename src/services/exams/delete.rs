use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamService, exam_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_exam(scope.branch_id, exam_id).await? {
            return Err(exam_not_found());
        }
        info!("Exam {} deleted from branch {}", exam_id, scope.branch_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Exam deleted successfully")))
    })
    .await
}
