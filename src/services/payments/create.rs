use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use super::PaymentService;
use crate::models::payments::requests::CreatePaymentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::fee_structures::check_amount;
use crate::services::{bad_reference, branch_scope, conflict, current_user, finish, invalid};
use crate::storage::PaymentOutcome;
use crate::utils::validate::optional_text;

fn normalize(req: CreatePaymentRequest) -> Result<CreatePaymentRequest, String> {
    if let Some(paid_at) = req.paid_at
        && paid_at > Utc::now()
    {
        return Err("paid_at cannot be in the future".to_string());
    }
    Ok(CreatePaymentRequest {
        amount: check_amount(req.amount)?,
        reference: optional_text(req.reference),
        ..req
    })
}

pub async fn create_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment_data: CreatePaymentRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let user = current_user(request)?;
        let storage = service.get_storage(request)?;

        let payment_data = normalize(payment_data).map_err(invalid)?;
        let invoice_id = payment_data.invoice_id;

        match storage
            .record_payment(scope.branch_id, Some(user.id), payment_data)
            .await?
        {
            PaymentOutcome::Recorded(receipt) => {
                info!(
                    "Payment {} of {:.2} recorded on invoice {} (status {})",
                    receipt.payment.id,
                    receipt.payment.amount,
                    receipt.invoice.invoice_no,
                    receipt.invoice.status
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    receipt,
                    "Payment recorded successfully",
                )))
            }
            PaymentOutcome::InvoiceNotFound => Err(bad_reference(
                ErrorCode::InvoiceNotFound,
                format!("Invoice {invoice_id} does not exist in this branch"),
            )),
            PaymentOutcome::InvoiceNotPayable => Err(conflict(
                ErrorCode::InvoiceNotPayable,
                "Invoice is already paid or cancelled",
            )),
            PaymentOutcome::ExceedsBalance { outstanding } => Err(HttpResponse::build(
                StatusCode::BAD_REQUEST,
            )
            .json(ApiResponse::error(
                ErrorCode::PaymentExceedsBalance,
                json!({ "outstanding": outstanding }),
                format!("Payment exceeds the outstanding balance of {outstanding:.2}"),
            ))),
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payments::entities::PaymentMethod;
    use chrono::Duration;

    fn request(amount: f64) -> CreatePaymentRequest {
        CreatePaymentRequest {
            invoice_id: 1,
            amount,
            method: PaymentMethod::Cash,
            reference: Some("   ".to_string()),
            paid_at: None,
        }
    }

    #[test]
    fn test_normalize_payment() {
        let payment = normalize(request(99.999)).unwrap();
        assert_eq!(payment.amount, 100.0);
        assert_eq!(payment.reference, None);

        assert!(normalize(request(0.0)).is_err());

        let mut future = request(10.0);
        future.paid_at = Some(Utc::now() + Duration::days(2));
        assert!(normalize(future).is_err());
    }
}
