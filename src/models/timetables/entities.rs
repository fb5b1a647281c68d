use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课表节次
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/timetable.ts")]
pub struct TimetablePeriod {
    pub id: i64,
    pub branch_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    /// 1 = 周一 … 7 = 周日
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::define_string_enum! {
    /// 冲突类型
    ConflictKind, "../admin/src/types/generated/timetable.ts" {
        Section => "section",
        Teacher => "teacher",
        Room => "room",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/timetable.ts")]
pub struct TimetableConflict {
    pub period_id: i64,
    pub kinds: Vec<ConflictKind>,
}
