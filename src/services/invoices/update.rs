use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{InvoiceService, check_fee_structures, invoice_locked, invoice_not_found, normalize_items};
use crate::models::ApiResponse;
use crate::models::invoices::requests::UpdateInvoiceRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::storage::InvoiceWrite;
use crate::utils::validate::parse_date;

pub async fn update_invoice(
    service: &InvoiceService,
    request: &HttpRequest,
    invoice_id: i64,
    update_data: UpdateInvoiceRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let existing = storage
            .get_invoice(scope.branch_id, invoice_id)
            .await?
            .ok_or_else(invoice_not_found)?;

        let due_date = match update_data.due_date {
            Some(value) => {
                let due = parse_date(&value).map_err(invalid)?;
                let issue = parse_date(&existing.issue_date).map_err(invalid)?;
                if due < issue {
                    return Err(invalid("due_date cannot be earlier than issue_date"));
                }
                Some(due.to_string())
            }
            None => None,
        };
        let items = update_data
            .items
            .map(normalize_items)
            .transpose()
            .map_err(invalid)?;
        if let Some(items) = &items {
            check_fee_structures(&storage, scope.branch_id, items).await?;
        }

        match storage
            .update_invoice(scope.branch_id, invoice_id, due_date, items)
            .await?
        {
            InvoiceWrite::Done(invoice) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                invoice,
                "Invoice updated successfully",
            ))),
            InvoiceWrite::NotFound => Err(invoice_not_found()),
            InvoiceWrite::Locked => Err(invoice_locked(
                "Invoice cannot be edited after payments or cancellation",
            )),
        }
    })
    .await
}
