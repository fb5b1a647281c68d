use serde::Serialize;
use ts_rs::TS;

use super::entities::TimetablePeriod;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/timetable.ts")]
pub struct TimetableDay {
    pub day_of_week: i32,
    pub periods: Vec<TimetablePeriod>,
}

// 班级分组周课表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/timetable.ts")]
pub struct SectionTimetableResponse {
    pub section_id: i64,
    pub days: Vec<TimetableDay>,
}

impl SectionTimetableResponse {
    /// 按星期分组（输入须已按星期、开始时间排序）
    pub fn from_periods(section_id: i64, periods: Vec<TimetablePeriod>) -> Self {
        let mut days: Vec<TimetableDay> = Vec::new();
        for period in periods {
            match days.last_mut() {
                Some(day) if day.day_of_week == period.day_of_week => day.periods.push(period),
                _ => days.push(TimetableDay {
                    day_of_week: period.day_of_week,
                    periods: vec![period],
                }),
            }
        }
        Self { section_id, days }
    }
}
