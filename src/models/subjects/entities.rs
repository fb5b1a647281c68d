use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub branch_id: i64,
    pub code: String,
    pub name: String,
    /// 显式设置的适用年级范围，为空时按内置年级表推断
    pub min_grade: Option<i32>,
    pub max_grade: Option<i32>,
    /// 实际生效的适用年级范围
    pub applicable_from: i32,
    pub applicable_to: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    pub fn applies_to(&self, grade: i32) -> bool {
        (self.applicable_from..=self.applicable_to).contains(&grade)
    }
}
