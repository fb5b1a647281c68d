use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 注册状态
    EnrollmentStatus, "../admin/src/types/generated/enrollment.ts" {
        Active => "active",
        Withdrawn => "withdrawn",
        Completed => "completed",
    }
}

// 学生在某学年的分班注册
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub branch_id: i64,
    pub student_id: i64,
    pub section_id: i64,
    pub academic_year: String,
    pub roll_number: Option<i32>,
    pub status: EnrollmentStatus,
    pub enrolled_at: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
