pub mod create;
pub mod delete;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::payments::requests::{CreatePaymentRequest, PaymentListParams};
use crate::services::not_found;
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_payments(
        &self,
        request: &HttpRequest,
        query: PaymentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, request, query).await
    }

    pub async fn create_payment(
        &self,
        request: &HttpRequest,
        payment_data: CreatePaymentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_payment(self, request, payment_data).await
    }

    pub async fn get_payment(
        &self,
        request: &HttpRequest,
        payment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_payment(self, request, payment_id).await
    }

    pub async fn delete_payment(
        &self,
        request: &HttpRequest,
        payment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_payment(self, request, payment_id).await
    }
}

pub(crate) fn payment_not_found() -> HttpResponse {
    not_found(ErrorCode::PaymentNotFound, "Payment not found")
}
