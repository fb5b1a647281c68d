use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeStructureService;
use crate::models::fee_structures::requests::FeeStructureListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_fee_structures(
    service: &FeeStructureService,
    request: &HttpRequest,
    query: FeeStructureListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_fee_structures_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Fee structure list retrieved successfully"))
    })
    .await
}
