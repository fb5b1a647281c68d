use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::sections::requests::SectionListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_sections(
    service: &SectionService,
    request: &HttpRequest,
    query: SectionListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_sections_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Section list retrieved successfully"))
    })
    .await
}
