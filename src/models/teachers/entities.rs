use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 教师状态
    TeacherStatus, "../admin/src/types/generated/teacher.ts" {
        Active => "active",
        Inactive => "inactive",
    }
}

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub branch_id: i64,
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub hire_date: Option<String>,
    pub status: TeacherStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
