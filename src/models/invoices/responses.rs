use serde::Serialize;
use ts_rs::TS;

// 学生欠费汇总（不含已取消账单）
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/invoice.ts")]
pub struct FeeBalanceResponse {
    pub student_id: i64,
    pub invoice_count: i64,
    pub overdue_count: i64,
    pub invoiced: f64,
    pub paid: f64,
    pub outstanding: f64,
}
