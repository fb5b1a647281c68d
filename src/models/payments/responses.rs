use serde::Serialize;
use ts_rs::TS;

use super::entities::Payment;
use crate::models::invoices::entities::Invoice;

// 收款回执：缴费记录与更新后的账单
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/payment.ts")]
pub struct PaymentReceiptResponse {
    pub payment: Payment,
    pub invoice: Invoice,
}
