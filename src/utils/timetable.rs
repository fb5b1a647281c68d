//! 课表冲突检测
//!
//! 同一天内时间段 `[start, end)` 相交即视为重叠；同一班级分组、同一教师或
//! 同一教室（非空、忽略大小写）的重叠节次构成冲突。

use chrono::NaiveTime;

use crate::models::timetables::entities::{ConflictKind, TimetableConflict, TimetablePeriod};

/// 待检测的节次
#[derive(Debug, Clone)]
pub struct PeriodSlot<'a> {
    pub section_id: i64,
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub room: Option<&'a str>,
}

/// 两个半开区间是否相交
pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && b_start < a_end
}

fn same_room(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// 与已有节次比较，返回冲突列表
///
/// `existing` 中 id 等于 `exclude_id` 的节次（即正在更新的节次本身）会被跳过。
/// 时间无法解析的已有节次不参与比较。
pub fn find_conflicts(
    slot: &PeriodSlot<'_>,
    existing: &[TimetablePeriod],
    exclude_id: Option<i64>,
) -> Vec<TimetableConflict> {
    let mut conflicts = Vec::new();

    for period in existing {
        if Some(period.id) == exclude_id || period.day_of_week != slot.day_of_week {
            continue;
        }
        let (Ok(start), Ok(end)) = (
            NaiveTime::parse_from_str(&period.start_time, "%H:%M"),
            NaiveTime::parse_from_str(&period.end_time, "%H:%M"),
        ) else {
            continue;
        };
        if !overlaps(slot.start, slot.end, start, end) {
            continue;
        }

        let mut kinds = Vec::new();
        if period.section_id == slot.section_id {
            kinds.push(ConflictKind::Section);
        }
        if period.teacher_id == slot.teacher_id {
            kinds.push(ConflictKind::Teacher);
        }
        if same_room(slot.room, period.room.as_deref()) {
            kinds.push(ConflictKind::Room);
        }
        if !kinds.is_empty() {
            conflicts.push(TimetableConflict {
                period_id: period.id,
                kinds,
            });
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn period(
        id: i64,
        section_id: i64,
        teacher_id: i64,
        day: i32,
        start: &str,
        end: &str,
        room: Option<&str>,
    ) -> TimetablePeriod {
        TimetablePeriod {
            id,
            branch_id: 1,
            section_id,
            subject_id: 1,
            teacher_id,
            day_of_week: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            room: room.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn slot<'a>(section_id: i64, teacher_id: i64, room: Option<&'a str>) -> PeriodSlot<'a> {
        PeriodSlot {
            section_id,
            teacher_id,
            day_of_week: 1,
            start: t("09:00"),
            end: t("09:45"),
            room,
        }
    }

    #[test]
    fn test_overlap_is_half_open() {
        assert!(overlaps(t("09:00"), t("10:00"), t("09:30"), t("10:30")));
        assert!(overlaps(t("09:00"), t("10:00"), t("09:15"), t("09:30")));
        assert!(!overlaps(t("09:00"), t("10:00"), t("10:00"), t("11:00")));
        assert!(!overlaps(t("10:00"), t("11:00"), t("09:00"), t("10:00")));
    }

    #[test]
    fn test_conflict_kinds() {
        let existing = vec![
            period(1, 10, 100, 1, "09:30", "10:15", None),
            period(2, 11, 200, 1, "08:30", "09:15", None),
            period(3, 12, 300, 1, "09:00", "09:45", Some("LAB-1")),
            period(4, 10, 100, 2, "09:00", "09:45", None),
            period(5, 10, 200, 1, "09:45", "10:30", None),
        ];

        let conflicts = find_conflicts(&slot(10, 200, Some("lab-1")), &existing, None);
        assert_eq!(
            conflicts,
            vec![
                TimetableConflict {
                    period_id: 1,
                    kinds: vec![ConflictKind::Section],
                },
                TimetableConflict {
                    period_id: 2,
                    kinds: vec![ConflictKind::Teacher],
                },
                TimetableConflict {
                    period_id: 3,
                    kinds: vec![ConflictKind::Room],
                },
            ]
        );
    }

    #[test]
    fn test_updated_period_is_excluded() {
        let existing = vec![period(1, 10, 100, 1, "09:00", "09:45", None)];
        assert!(find_conflicts(&slot(10, 100, None), &existing, Some(1)).is_empty());
        assert_eq!(find_conflicts(&slot(10, 100, None), &existing, None).len(), 1);
    }

    #[test]
    fn test_blank_rooms_never_conflict() {
        let existing = vec![period(1, 11, 101, 1, "09:00", "09:45", Some("  "))];
        assert!(find_conflicts(&slot(10, 100, Some(" ")), &existing, None).is_empty());
    }
}
