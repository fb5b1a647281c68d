use crate::models::common::{ListQuery, deserialize_nullable, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/section.ts")]
pub struct SectionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/section.ts")]
pub struct CreateSectionRequest {
    pub class_id: i64,
    pub name: String,
    pub capacity: i32,
    pub class_teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/section.ts")]
pub struct UpdateSectionRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub class_teacher_id: Option<Option<i64>>,
}
