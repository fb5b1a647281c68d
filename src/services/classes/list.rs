use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::requests::ClassListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_classes_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Class list retrieved successfully"))
    })
    .await
}
