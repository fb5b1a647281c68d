use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PaymentService, payment_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn delete_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        // 返回回退金额后的账单
        match storage.delete_payment(scope.branch_id, payment_id).await? {
            Some(invoice) => {
                info!(
                    "Payment {} reversed, invoice {} now {}",
                    payment_id, invoice.invoice_no, invoice.status
                );
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    invoice,
                    "Payment deleted successfully",
                )))
            }
            None => Err(payment_not_found()),
        }
    })
    .await
}
