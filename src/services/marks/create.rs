use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarkService, check_marks, require_exam, require_in_class};
use crate::models::ApiResponse;
use crate::models::marks::requests::CreateMarkRequest;
use crate::services::references::require_student;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::optional_text;

pub async fn create_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_data: CreateMarkRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let exam = require_exam(&storage, scope.branch_id, mark_data.exam_id).await?;
        check_marks(mark_data.marks_obtained, &exam).map_err(invalid)?;
        require_student(&storage, scope.branch_id, mark_data.student_id).await?;
        require_in_class(&storage, scope.branch_id, &exam, mark_data.student_id).await?;

        // (exam, student) 重复由唯一约束转为 409
        let mark = storage
            .create_mark(
                scope.branch_id,
                &exam,
                CreateMarkRequest {
                    remarks: optional_text(mark_data.remarks),
                    ..mark_data
                },
            )
            .await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(mark, "Mark recorded successfully")))
    })
    .await
}
