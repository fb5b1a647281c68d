use serde::Serialize;
use ts_rs::TS;

use super::entities::{AttendanceCounts, AttendanceRecord, AttendanceSession};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct AttendanceDetailResponse {
    pub session: AttendanceSession,
    pub records: Vec<AttendanceRecord>,
    pub counts: AttendanceCounts,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryResponse {
    pub student_id: i64,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub counts: AttendanceCounts,
    /// 出勤率（0-100），无记录时为空
    pub attendance_rate: Option<f64>,
}
