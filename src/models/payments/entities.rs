use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 支付方式
    PaymentMethod, "../admin/src/types/generated/payment.ts" {
        Cash => "cash",
        Card => "card",
        BankTransfer => "bank_transfer",
        Online => "online",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/payment.ts")]
pub struct Payment {
    pub id: i64,
    pub branch_id: i64,
    pub invoice_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub paid_at: DateTime<Utc>,
    pub recorded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}
