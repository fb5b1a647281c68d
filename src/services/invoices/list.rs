use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InvoiceService;
use crate::models::invoices::requests::InvoiceListParams;
use crate::services::{branch_scope, finish, list_response, today};

pub async fn list_invoices(
    service: &InvoiceService,
    request: &HttpRequest,
    query: InvoiceListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_invoices_with_pagination(scope.branch_id, query, &today())
            .await?;
        Ok(list_response(page, "Invoice list retrieved successfully"))
    })
    .await
}
