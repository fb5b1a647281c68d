use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarkService, check_marks, mark_not_found};
use crate::models::ApiResponse;
use crate::models::marks::requests::UpdateMarkRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::optional_text;

pub async fn update_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_id: i64,
    update_data: UpdateMarkRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let mark = storage
            .get_mark(scope.branch_id, mark_id)
            .await?
            .ok_or_else(mark_not_found)?;
        let exam = storage
            .get_exam(scope.branch_id, mark.exam_id)
            .await?
            .ok_or_else(mark_not_found)?;

        if let Some(marks_obtained) = update_data.marks_obtained {
            check_marks(marks_obtained, &exam).map_err(invalid)?;
        }

        let update_data = UpdateMarkRequest {
            remarks: update_data.remarks.map(optional_text),
            ..update_data
        };
        match storage
            .update_mark(scope.branch_id, &exam, mark_id, update_data)
            .await?
        {
            Some(mark) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                mark,
                "Mark updated successfully",
            ))),
            None => Err(mark_not_found()),
        }
    })
    .await
}
