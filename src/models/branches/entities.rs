use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 校区
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/branch.ts")]
pub struct Branch {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
