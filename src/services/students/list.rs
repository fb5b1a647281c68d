use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::StudentListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_students_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Student list retrieved successfully"))
    })
    .await
}
