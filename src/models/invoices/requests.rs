use super::entities::{InvoiceItem, InvoiceStatus};
use crate::models::common::{ListQuery, deserialize_optional_bool, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/invoice.ts")]
pub struct InvoiceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    pub status: Option<InvoiceStatus>,
    /// 仅返回已逾期且未结清的账单
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub overdue: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/invoice.ts")]
pub struct CreateInvoiceRequest {
    pub student_id: i64,
    /// 缺省为当天
    pub issue_date: Option<String>,
    pub due_date: String,
    pub items: Vec<InvoiceItem>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/invoice.ts")]
pub struct UpdateInvoiceRequest {
    pub due_date: Option<String>,
    pub items: Option<Vec<InvoiceItem>>,
}
