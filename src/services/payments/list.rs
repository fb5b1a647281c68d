use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::payments::requests::PaymentListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_payments(
    service: &PaymentService,
    request: &HttpRequest,
    query: PaymentListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_payments_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Payment list retrieved successfully"))
    })
    .await
}
