use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{InvoiceService, check_fee_structures, normalize_items};
use crate::models::ApiResponse;
use crate::models::invoices::entities::items_total;
use crate::models::invoices::requests::CreateInvoiceRequest;
use crate::services::references::require_student;
use crate::services::{branch_scope, finish, invalid, today};
use crate::storage::NewInvoice;
use crate::utils::random_code::generate_code;
use crate::utils::validate::parse_date;

/// 账单编号 `INV-{校区}-{yyyymmdd}-{6 位随机码}`
pub(crate) fn invoice_number(branch_id: i64) -> String {
    format!(
        "INV-{branch_id}-{}-{}",
        Utc::now().format("%Y%m%d"),
        generate_code(6)
    )
}

/// 开票日缺省为当天，到期日不得早于开票日
pub(crate) fn check_dates(issue_date: Option<&str>, due_date: &str) -> Result<(String, String), String> {
    let issue = match issue_date {
        Some(value) => parse_date(value)?,
        None => parse_date(&today())?,
    };
    let due = parse_date(due_date)?;
    if due < issue {
        return Err("due_date cannot be earlier than issue_date".to_string());
    }
    Ok((issue.to_string(), due.to_string()))
}

pub async fn create_invoice(
    service: &InvoiceService,
    request: &HttpRequest,
    invoice_data: CreateInvoiceRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let (issue_date, due_date) =
            check_dates(invoice_data.issue_date.as_deref(), &invoice_data.due_date)
                .map_err(invalid)?;
        let items = normalize_items(invoice_data.items).map_err(invalid)?;
        require_student(&storage, scope.branch_id, invoice_data.student_id).await?;
        check_fee_structures(&storage, scope.branch_id, &items).await?;

        let invoice = storage
            .create_invoice(
                scope.branch_id,
                NewInvoice {
                    student_id: invoice_data.student_id,
                    invoice_no: invoice_number(scope.branch_id),
                    issue_date,
                    due_date,
                    total_amount: items_total(&items),
                    items,
                },
            )
            .await?;
        info!(
            "Invoice {} issued to student {} for {:.2}",
            invoice.invoice_no, invoice.student_id, invoice.total_amount
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            invoice,
            "Invoice created successfully",
        )))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_format() {
        let number = invoice_number(12);
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "INV");
        assert_eq!(parts[1], "12");
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[3].len(), 6);
    }

    #[test]
    fn test_check_dates() {
        assert_eq!(
            check_dates(Some("2025-09-01"), "2025-09-30"),
            Ok(("2025-09-01".to_string(), "2025-09-30".to_string()))
        );
        assert!(check_dates(Some("2025-09-01"), "2025-09-01").is_ok());
        assert!(check_dates(Some("2025-09-02"), "2025-09-01").is_err());
        assert!(check_dates(None, "2000-01-01").is_err());
        assert!(check_dates(Some("01/09/2025"), "2025-09-30").is_err());
    }
}
