use serde::Serialize;
use ts_rs::TS;

// 校区概览
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub branch_id: i64,
    pub active_students: i64,
    pub active_teachers: i64,
    pub classes: i64,
    pub sections: i64,
    /// 今日出勤率（0-100），今日无考勤时为空
    pub today_attendance_rate: Option<f64>,
    pub outstanding_fees: f64,
}
