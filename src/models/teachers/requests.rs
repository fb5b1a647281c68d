use super::entities::TeacherStatus;
use crate::models::common::{ListQuery, deserialize_nullable};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/teacher.ts")]
pub struct TeacherListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    pub status: Option<TeacherStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub hire_date: Option<String>,
    pub status: Option<TeacherStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub employee_no: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub specialization: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub hire_date: Option<Option<String>>,
    pub status: Option<TeacherStatus>,
}
