use crate::models::common::{ListQuery, deserialize_nullable, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/subject.ts")]
pub struct SubjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
}

// 查询某年级适用的科目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/subject.ts")]
pub struct ApplicableSubjectsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub grade: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
    pub min_grade: Option<i32>,
    pub max_grade: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub min_grade: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub max_grade: Option<Option<i32>>,
}
