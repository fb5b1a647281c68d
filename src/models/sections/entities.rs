use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级分组（如 5A、5B）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/section.ts")]
pub struct Section {
    pub id: i64,
    pub branch_id: i64,
    pub class_id: i64,
    pub name: String,
    pub capacity: i32,
    pub class_teacher_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
