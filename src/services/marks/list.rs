use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::marks::requests::MarkListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_marks(
    service: &MarkService,
    request: &HttpRequest,
    query: MarkListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_marks_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Mark list retrieved successfully"))
    })
    .await
}
