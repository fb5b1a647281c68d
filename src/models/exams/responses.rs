use serde::Serialize;
use ts_rs::TS;

use super::entities::Exam;

// 考试成绩汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/exam.ts")]
pub struct ExamResultsResponse {
    pub exam: Exam,
    pub count: i64,
    pub average: Option<f64>,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
    pub pass_count: i64,
    pub fail_count: i64,
    /// 及格率（0-100），无成绩时为空
    pub pass_rate: Option<f64>,
}
