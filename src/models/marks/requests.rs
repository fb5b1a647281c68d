use crate::models::common::{ListQuery, deserialize_nullable, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/mark.ts")]
pub struct MarkListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub exam_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/mark.ts")]
pub struct CreateMarkRequest {
    pub exam_id: i64,
    pub student_id: i64,
    pub marks_obtained: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/mark.ts")]
pub struct UpdateMarkRequest {
    pub marks_obtained: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub remarks: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/mark.ts")]
pub struct BulkMarkEntry {
    pub student_id: i64,
    pub marks_obtained: f64,
    pub remarks: Option<String>,
}

// 批量录入（同一考试，存在则更新）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/mark.ts")]
pub struct BulkMarksRequest {
    pub exam_id: i64,
    pub entries: Vec<BulkMarkEntry>,
}
