use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeeStructureService, fee_structure_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_fee_structure(
    service: &FeeStructureService,
    request: &HttpRequest,
    fee_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_fee_structure(scope.branch_id, fee_id).await? {
            Some(fee) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                fee,
                "Fee structure retrieved successfully",
            ))),
            None => Err(fee_structure_not_found()),
        }
    })
    .await
}
