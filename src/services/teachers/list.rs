use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::teachers::requests::TeacherListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_teachers_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Teacher list retrieved successfully"))
    })
    .await
}
