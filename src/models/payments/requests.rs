use super::entities::PaymentMethod;
use crate::models::common::{ListQuery, deserialize_optional_i64};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/payment.ts")]
pub struct PaymentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub invoice_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/payment.ts")]
pub struct CreatePaymentRequest {
    pub invoice_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    /// 缺省为当前时间
    pub paid_at: Option<DateTime<Utc>>,
}
