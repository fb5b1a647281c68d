use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::requests::SubjectListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: SubjectListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_subjects_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Subject list retrieved successfully"))
    })
    .await
}
