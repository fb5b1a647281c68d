use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{InvoiceService, invoice_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_invoice(
    service: &InvoiceService,
    request: &HttpRequest,
    invoice_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_invoice(scope.branch_id, invoice_id).await? {
            Some(invoice) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                invoice,
                "Invoice retrieved successfully",
            ))),
            None => Err(invoice_not_found()),
        }
    })
    .await
}
