//! 年级与科目适用性
//!
//! 内置一张年级段表和常见科目的适用年级范围。科目显式设置了
//! `min_grade`/`max_grade` 时以显式设置为准；否则查表；表中没有的科目适用于所有年级。

use std::ops::RangeInclusive;

pub const MIN_GRADE: i32 = 0;
pub const MAX_GRADE: i32 = 12;

/// 年级段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    Kindergarten,
    Primary,
    Middle,
    Secondary,
    SeniorSecondary,
}

impl GradeBand {
    pub const ALL: [GradeBand; 5] = [
        GradeBand::Kindergarten,
        GradeBand::Primary,
        GradeBand::Middle,
        GradeBand::Secondary,
        GradeBand::SeniorSecondary,
    ];

    pub fn grades(&self) -> RangeInclusive<i32> {
        match self {
            GradeBand::Kindergarten => 0..=0,
            GradeBand::Primary => 1..=5,
            GradeBand::Middle => 6..=8,
            GradeBand::Secondary => 9..=10,
            GradeBand::SeniorSecondary => 11..=12,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GradeBand::Kindergarten => "kindergarten",
            GradeBand::Primary => "primary",
            GradeBand::Middle => "middle",
            GradeBand::Secondary => "secondary",
            GradeBand::SeniorSecondary => "senior_secondary",
        }
    }

    pub fn for_grade(grade: i32) -> Option<GradeBand> {
        Self::ALL
            .into_iter()
            .find(|band| band.grades().contains(&grade))
    }
}

// (科目编码, 最低年级, 最高年级)
const SUBJECT_GRADES: &[(&str, i32, i32)] = &[
    ("phonics", 0, 2),
    ("english", 0, 12),
    ("mathematics", 0, 12),
    ("maths", 0, 12),
    ("art", 0, 12),
    ("music", 0, 12),
    ("physical_education", 0, 12),
    ("evs", 1, 5),
    ("environmental_studies", 1, 5),
    ("general_knowledge", 1, 8),
    ("computer_science", 1, 12),
    ("second_language", 1, 10),
    ("science", 3, 10),
    ("social_studies", 3, 10),
    ("history", 6, 12),
    ("geography", 6, 12),
    ("civics", 6, 10),
    ("physics", 9, 12),
    ("chemistry", 9, 12),
    ("biology", 9, 12),
    ("economics", 9, 12),
    ("accountancy", 11, 12),
    ("business_studies", 11, 12),
    ("political_science", 11, 12),
    ("psychology", 11, 12),
    ("sociology", 11, 12),
];

/// 查表得到科目的适用年级范围
pub fn table_range(code: &str) -> Option<(i32, i32)> {
    SUBJECT_GRADES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|&(_, min, max)| (min, max))
}

/// 科目实际生效的适用年级范围
pub fn applicable_range(code: &str, min_grade: Option<i32>, max_grade: Option<i32>) -> (i32, i32) {
    if min_grade.is_some() || max_grade.is_some() {
        return (
            min_grade.unwrap_or(MIN_GRADE),
            max_grade.unwrap_or(MAX_GRADE),
        );
    }
    table_range(code).unwrap_or((MIN_GRADE, MAX_GRADE))
}

/// 科目是否适用于指定年级
pub fn is_applicable(
    code: &str,
    min_grade: Option<i32>,
    max_grade: Option<i32>,
    grade: i32,
) -> bool {
    let (from, to) = applicable_range(code, min_grade, max_grade);
    (from..=to).contains(&grade)
}

/// 校验显式年级范围
pub fn validate_explicit_range(
    min_grade: Option<i32>,
    max_grade: Option<i32>,
) -> Result<(), &'static str> {
    for grade in [min_grade, max_grade].into_iter().flatten() {
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err("Grade range must be within 0..=12");
        }
    }
    if let (Some(min), Some(max)) = (min_grade, max_grade)
        && min > max
    {
        return Err("min_grade must not exceed max_grade");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_cover_every_grade_once() {
        for grade in MIN_GRADE..=MAX_GRADE {
            let bands: Vec<_> = GradeBand::ALL
                .iter()
                .filter(|b| b.grades().contains(&grade))
                .collect();
            assert_eq!(bands.len(), 1, "grade {grade}");
        }
        assert_eq!(GradeBand::for_grade(0), Some(GradeBand::Kindergarten));
        assert_eq!(GradeBand::for_grade(7), Some(GradeBand::Middle));
        assert_eq!(GradeBand::for_grade(13), None);
    }

    #[test]
    fn test_table_lookup() {
        assert!(is_applicable("evs", None, None, 3));
        assert!(!is_applicable("evs", None, None, 7));
        assert!(is_applicable("physics", None, None, 11));
        assert!(!is_applicable("physics", None, None, 8));
        assert!(!is_applicable("accountancy", None, None, 10));
        assert!(is_applicable("phonics", None, None, 0));
        assert!(is_applicable("english", None, None, 0));
    }

    #[test]
    fn test_unknown_code_applies_everywhere() {
        assert_eq!(applicable_range("robotics", None, None), (0, 12));
        assert!(is_applicable("robotics", None, None, 0));
        assert!(is_applicable("robotics", None, None, 12));
    }

    #[test]
    fn test_explicit_range_overrides_table() {
        assert!(is_applicable("physics", Some(6), None, 6));
        assert!(!is_applicable("english", Some(3), Some(5), 2));
        assert_eq!(applicable_range("evs", None, Some(2)), (0, 2));
    }

    #[test]
    fn test_validate_explicit_range() {
        assert!(validate_explicit_range(Some(1), Some(5)).is_ok());
        assert!(validate_explicit_range(None, None).is_ok());
        assert!(validate_explicit_range(Some(6), Some(5)).is_err());
        assert!(validate_explicit_range(Some(-1), None).is_err());
        assert!(validate_explicit_range(None, Some(13)).is_err());
    }
}
