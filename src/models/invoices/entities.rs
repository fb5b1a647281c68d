use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 账单状态
    InvoiceStatus, "../admin/src/types/generated/invoice.ts" {
        Issued => "issued",
        PartiallyPaid => "partially_paid",
        Paid => "paid",
        Cancelled => "cancelled",
    }
}

impl InvoiceStatus {
    /// 根据已付金额推导状态（已取消的账单不参与推导）
    pub fn from_amounts(total: f64, paid: f64) -> Self {
        if paid <= 0.0 {
            InvoiceStatus::Issued
        } else if paid + 0.005 >= total {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::PartiallyPaid
        }
    }

    /// 是否还能继续收款
    pub fn accepts_payment(&self) -> bool {
        matches!(self, InvoiceStatus::Issued | InvoiceStatus::PartiallyPaid)
    }
}

// 账单明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/invoice.ts")]
pub struct InvoiceItem {
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub fee_structure_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/invoice.ts")]
pub struct Invoice {
    pub id: i64,
    pub branch_id: i64,
    pub student_id: i64,
    pub invoice_no: String,
    pub issue_date: String,
    pub due_date: String,
    pub items: Vec<InvoiceItem>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub balance: f64,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 金额保留两位小数
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// 明细合计
pub fn items_total(items: &[InvoiceItem]) -> f64 {
    round_money(items.iter().map(|item| item.amount).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_amounts() {
        assert_eq!(InvoiceStatus::from_amounts(100.0, 0.0), InvoiceStatus::Issued);
        assert_eq!(
            InvoiceStatus::from_amounts(100.0, 40.0),
            InvoiceStatus::PartiallyPaid
        );
        assert_eq!(InvoiceStatus::from_amounts(100.0, 100.0), InvoiceStatus::Paid);
        assert_eq!(
            InvoiceStatus::from_amounts(0.3, 0.1 + 0.2),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_only_open_invoices_accept_payment() {
        assert!(InvoiceStatus::Issued.accepts_payment());
        assert!(InvoiceStatus::PartiallyPaid.accepts_payment());
        assert!(!InvoiceStatus::Paid.accepts_payment());
        assert!(!InvoiceStatus::Cancelled.accepts_payment());
    }

    #[test]
    fn test_items_total_rounds_to_cents() {
        let items = vec![
            InvoiceItem {
                description: "Tuition".to_string(),
                amount: 1200.105,
                fee_structure_id: Some(1),
            },
            InvoiceItem {
                description: "Lab fee".to_string(),
                amount: 0.1 + 0.2,
                fee_structure_id: None,
            },
        ];
        assert_eq!(items_total(&items), 1200.41);
    }
}
