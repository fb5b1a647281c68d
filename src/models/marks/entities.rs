use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩记录，附带按考试满分/及格线计算的派生字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/mark.ts")]
pub struct Mark {
    pub id: i64,
    pub branch_id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub marks_obtained: f64,
    pub remarks: Option<String>,
    pub percentage: f64,
    pub letter_grade: String,
    pub passed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
