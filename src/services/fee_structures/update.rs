use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeeStructureService, check_amount, fee_structure_not_found};
use crate::models::ApiResponse;
use crate::models::fee_structures::requests::UpdateFeeStructureRequest;
use crate::services::references::require_class;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::{require_text, validate_academic_year};

pub async fn update_fee_structure(
    service: &FeeStructureService,
    request: &HttpRequest,
    fee_id: i64,
    update_data: UpdateFeeStructureRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let update_data = normalize(update_data).map_err(invalid)?;
        if let Some(Some(class_id)) = update_data.class_id {
            require_class(&storage, scope.branch_id, class_id).await?;
        }

        match storage
            .update_fee_structure(scope.branch_id, fee_id, update_data)
            .await?
        {
            Some(fee) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                fee,
                "Fee structure updated successfully",
            ))),
            None => Err(fee_structure_not_found()),
        }
    })
    .await
}

fn normalize(req: UpdateFeeStructureRequest) -> Result<UpdateFeeStructureRequest, String> {
    let academic_year = req.academic_year.map(|y| y.trim().to_string());
    if let Some(year) = &academic_year {
        validate_academic_year(year)?;
    }

    Ok(UpdateFeeStructureRequest {
        name: req
            .name
            .map(|n| require_text("name", &n, 128))
            .transpose()?,
        amount: req.amount.map(check_amount).transpose()?,
        academic_year,
        ..req
    })
}
