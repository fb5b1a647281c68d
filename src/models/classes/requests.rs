use crate::models::common::{ListQuery, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/class.ts")]
pub struct ClassListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub grade_level: Option<i64>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub grade_level: i32,
    pub academic_year: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub grade_level: Option<i32>,
    pub academic_year: Option<String>,
}
