use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeeStructureService, check_amount};
use crate::models::ApiResponse;
use crate::models::fee_structures::requests::CreateFeeStructureRequest;
use crate::services::references::require_class;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::{require_text, validate_academic_year};

pub async fn create_fee_structure(
    service: &FeeStructureService,
    request: &HttpRequest,
    fee_data: CreateFeeStructureRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let fee_data = normalize(fee_data).map_err(invalid)?;
        if let Some(class_id) = fee_data.class_id {
            require_class(&storage, scope.branch_id, class_id).await?;
        }

        let fee = storage
            .create_fee_structure(scope.branch_id, fee_data)
            .await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            fee,
            "Fee structure created successfully",
        )))
    })
    .await
}

fn normalize(req: CreateFeeStructureRequest) -> Result<CreateFeeStructureRequest, String> {
    let academic_year = req.academic_year.trim().to_string();
    validate_academic_year(&academic_year)?;

    Ok(CreateFeeStructureRequest {
        name: require_text("name", &req.name, 128)?,
        amount: check_amount(req.amount)?,
        academic_year,
        ..req
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fee_structures::entities::FeeFrequency;

    fn request(amount: f64, academic_year: &str) -> CreateFeeStructureRequest {
        CreateFeeStructureRequest {
            class_id: None,
            name: " Tuition ".to_string(),
            amount,
            frequency: FeeFrequency::Termly,
            academic_year: academic_year.to_string(),
        }
    }

    #[test]
    fn test_normalize() {
        let fee = normalize(request(450.0, " 2025-2026 ")).unwrap();
        assert_eq!(fee.name, "Tuition");
        assert_eq!(fee.academic_year, "2025-2026");

        assert!(normalize(request(0.0, "2025-2026")).is_err());
        assert!(normalize(request(450.0, "2025")).is_err());
    }
}
