use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试（某年级班某科目）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub branch_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub name: String,
    pub exam_date: String,
    pub max_marks: f64,
    pub pass_marks: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
