use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::requests::ExamListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_exams(
    service: &ExamService,
    request: &HttpRequest,
    query: ExamListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_exams_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Exam list retrieved successfully"))
    })
    .await
}
