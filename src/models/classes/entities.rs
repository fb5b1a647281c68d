use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 年级班（如 “Grade 5 / 2025-2026”）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    pub branch_id: i64,
    pub name: String,
    /// 0 表示幼儿园，1..=12 为年级
    pub grade_level: i32,
    pub academic_year: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
