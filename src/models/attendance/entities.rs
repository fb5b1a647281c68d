use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 出勤状态
    AttendanceStatus, "../admin/src/types/generated/attendance.ts" {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

// 考勤（某班级分组某天一次）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct AttendanceSession {
    pub id: i64,
    pub branch_id: i64,
    pub section_id: i64,
    pub date: String,
    pub taken_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub session_id: i64,
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

// 按状态计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/attendance.ts")]
pub struct AttendanceCounts {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
}

impl AttendanceCounts {
    pub fn add(&mut self, status: AttendanceStatus) {
        self.total += 1;
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::Excused => self.excused += 1,
        }
    }

    /// 出勤率 = (出勤 + 迟到) / 总数，无记录时为空
    pub fn attendance_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let rate = (self.present + self.late) as f64 / self.total as f64 * 100.0;
        Some((rate * 100.0).round() / 100.0)
    }
}

impl FromIterator<AttendanceStatus> for AttendanceCounts {
    fn from_iter<I: IntoIterator<Item = AttendanceStatus>>(iter: I) -> Self {
        let mut counts = AttendanceCounts::default();
        for status in iter {
            counts.add(status);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_rate() {
        let counts: AttendanceCounts = [
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Late,
            AttendanceStatus::Absent,
            AttendanceStatus::Excused,
            AttendanceStatus::Absent,
            AttendanceStatus::Present,
            AttendanceStatus::Present,
        ]
        .into_iter()
        .collect();

        assert_eq!(counts.total, 8);
        assert_eq!(counts.present, 4);
        assert_eq!(counts.absent, 2);
        assert_eq!(counts.attendance_rate(), Some(62.5));
    }

    #[test]
    fn test_empty_rate_is_none() {
        assert_eq!(AttendanceCounts::default().attendance_rate(), None);
    }

    #[test]
    fn test_rate_is_rounded() {
        let counts: AttendanceCounts = [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Absent,
        ]
        .into_iter()
        .collect();
        assert_eq!(counts.attendance_rate(), Some(33.33));
    }
}
