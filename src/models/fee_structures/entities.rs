use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 收费周期
    FeeFrequency, "../admin/src/types/generated/fee.ts" {
        OneTime => "one_time",
        Monthly => "monthly",
        Termly => "termly",
        Yearly => "yearly",
    }
}

// 收费标准（可按年级班区分）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/fee.ts")]
pub struct FeeStructure {
    pub id: i64,
    pub branch_id: i64,
    pub class_id: Option<i64>,
    pub name: String,
    pub amount: f64,
    pub frequency: FeeFrequency,
    pub academic_year: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
