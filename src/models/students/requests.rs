use super::entities::{Gender, StudentStatus};
use crate::models::common::{ListQuery, deserialize_nullable, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    pub status: Option<StudentStatus>,
    /// 仅返回在该班级分组中有有效注册的学生
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub section_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub status: Option<StudentStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub admission_no: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub date_of_birth: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub guardian_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub guardian_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub guardian_email: Option<Option<String>>,
    pub status: Option<StudentStatus>,
}
