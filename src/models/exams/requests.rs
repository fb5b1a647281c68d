use crate::models::common::{ListQuery, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/exam.ts")]
pub struct ExamListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub name: String,
    pub exam_date: String,
    pub max_marks: f64,
    pub pass_marks: f64,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub subject_id: Option<i64>,
    pub name: Option<String>,
    pub exam_date: Option<String>,
    pub max_marks: Option<f64>,
    pub pass_marks: Option<f64>,
}
