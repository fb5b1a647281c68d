/// 得分率（0-100，两位小数）
pub fn percentage(marks_obtained: f64, max_marks: f64) -> f64 {
    if max_marks <= 0.0 {
        return 0.0;
    }
    ((marks_obtained / max_marks) * 10000.0).round() / 100.0
}

/// 等级：A+ ≥ 90，A ≥ 80，B ≥ 70，C ≥ 60，D ≥ 50，E ≥ 40，其余 F
pub fn letter_grade(percentage: f64) -> &'static str {
    match percentage {
        p if p >= 90.0 => "A+",
        p if p >= 80.0 => "A",
        p if p >= 70.0 => "B",
        p if p >= 60.0 => "C",
        p if p >= 50.0 => "D",
        p if p >= 40.0 => "E",
        _ => "F",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(45.0, 50.0), 90.0);
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(100.0), "A+");
        assert_eq!(letter_grade(90.0), "A+");
        assert_eq!(letter_grade(89.99), "A");
        assert_eq!(letter_grade(80.0), "A");
        assert_eq!(letter_grade(70.0), "B");
        assert_eq!(letter_grade(60.0), "C");
        assert_eq!(letter_grade(50.0), "D");
        assert_eq!(letter_grade(40.0), "E");
        assert_eq!(letter_grade(39.99), "F");
        assert_eq!(letter_grade(0.0), "F");
    }
}
