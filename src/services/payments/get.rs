use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, payment_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_payment(scope.branch_id, payment_id).await? {
            Some(payment) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                payment,
                "Payment retrieved successfully",
            ))),
            None => Err(payment_not_found()),
        }
    })
    .await
}
