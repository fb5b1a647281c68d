use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 租户状态
    TenantStatus, "../admin/src/types/generated/tenant.ts" {
        Active => "active",
        Suspended => "suspended",
    }
}

// 租户（学校/教育集团）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/tenant.ts")]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
