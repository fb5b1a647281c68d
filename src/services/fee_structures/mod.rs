pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::fee_structures::requests::{
    CreateFeeStructureRequest, FeeStructureListParams, UpdateFeeStructureRequest,
};
use crate::services::not_found;
use crate::storage::Storage;

pub struct FeeStructureService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeeStructureService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_fee_structures(
        &self,
        request: &HttpRequest,
        query: FeeStructureListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_fee_structures(self, request, query).await
    }

    pub async fn create_fee_structure(
        &self,
        request: &HttpRequest,
        fee_data: CreateFeeStructureRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_fee_structure(self, request, fee_data).await
    }

    pub async fn get_fee_structure(
        &self,
        request: &HttpRequest,
        fee_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_fee_structure(self, request, fee_id).await
    }

    pub async fn update_fee_structure(
        &self,
        request: &HttpRequest,
        fee_id: i64,
        update_data: UpdateFeeStructureRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_fee_structure(self, request, fee_id, update_data).await
    }

    pub async fn delete_fee_structure(
        &self,
        request: &HttpRequest,
        fee_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_fee_structure(self, request, fee_id).await
    }
}

pub(crate) fn fee_structure_not_found() -> HttpResponse {
    not_found(ErrorCode::FeeStructureNotFound, "Fee structure not found")
}

/// 金额须为正数，按分取整
pub(crate) fn check_amount(amount: f64) -> Result<f64, &'static str> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("amount must be greater than 0");
    }
    Ok(crate::models::invoices::entities::round_money(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount() {
        assert_eq!(check_amount(1500.456), Ok(1500.46));
        assert!(check_amount(0.0).is_err());
        assert!(check_amount(-10.0).is_err());
        assert!(check_amount(f64::NAN).is_err());
    }
}
