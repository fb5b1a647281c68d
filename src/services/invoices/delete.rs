use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{InvoiceService, invoice_locked, invoice_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};
use crate::storage::InvoiceWrite;

pub async fn delete_invoice(
    service: &InvoiceService,
    request: &HttpRequest,
    invoice_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.delete_invoice(scope.branch_id, invoice_id).await? {
            InvoiceWrite::Done(()) => Ok(HttpResponse::Ok().json(
                ApiResponse::<()>::success_empty("Invoice deleted successfully"),
            )),
            InvoiceWrite::NotFound => Err(invoice_not_found()),
            InvoiceWrite::Locked => Err(invoice_locked(
                "Invoice with recorded payments cannot be deleted",
            )),
        }
    })
    .await
}
