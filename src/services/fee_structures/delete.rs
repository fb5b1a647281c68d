use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeeStructureService, fee_structure_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn delete_fee_structure(
    service: &FeeStructureService,
    request: &HttpRequest,
    fee_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_fee_structure(scope.branch_id, fee_id).await? {
            return Err(fee_structure_not_found());
        }
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Fee structure deleted successfully",
        )))
    })
    .await
}
