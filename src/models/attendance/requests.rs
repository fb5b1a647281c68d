use super::entities::AttendanceStatus;
use crate::models::common::{ListQuery, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub section_id: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct AttendanceRecordInput {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    pub section_id: i64,
    pub date: String,
    pub records: Vec<AttendanceRecordInput>,
}

// 整体替换某次考勤的记录
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub records: Vec<AttendanceRecordInput>,
}

// 学生出勤汇总的时间范围
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}
