use super::entities::EnrollmentStatus;
use crate::models::common::{ListQuery, deserialize_nullable, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/enrollment.ts")]
pub struct EnrollmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub section_id: Option<i64>,
    pub academic_year: Option<String>,
    pub status: Option<EnrollmentStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub section_id: i64,
    /// 缺省取班级所属学年
    pub academic_year: Option<String>,
    pub roll_number: Option<i32>,
    /// 缺省为当天
    pub enrolled_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub roll_number: Option<Option<i32>>,
    pub status: Option<EnrollmentStatus>,
}
