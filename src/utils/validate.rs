use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::grade_subjects::{MAX_GRADE, MIN_GRADE};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("Invalid code regex"));

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]{2,32}$").expect("Invalid subject code regex"));

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("Invalid academic year regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()-]{6,20}$").expect("Invalid phone regex"));

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 租户/校区编码：2-32 位小写字母、数字或连字符，不能以连字符开头或结尾
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 || code.len() > 32 {
        return Err("Code length must be between 2 and 32 characters");
    }
    if !CODE_RE.is_match(code) {
        return Err("Code must contain only lowercase letters, digits or hyphens");
    }
    Ok(())
}

/// 规范化科目编码（去空白、转小写），并校验格式
pub fn normalize_subject_code(code: &str) -> Result<String, &'static str> {
    let normalized = code.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    if !SUBJECT_CODE_RE.is_match(&normalized) {
        return Err("Subject code must be 2-32 characters of letters, digits or underscores");
    }
    Ok(normalized)
}

/// 学年格式 `YYYY-YYYY`，且后一年等于前一年加一
pub fn validate_academic_year(year: &str) -> Result<(), &'static str> {
    let caps = ACADEMIC_YEAR_RE
        .captures(year)
        .ok_or("Academic year must be formatted as YYYY-YYYY")?;
    let start: i32 = caps[1].parse().map_err(|_| "Invalid academic year")?;
    let end: i32 = caps[2].parse().map_err(|_| "Invalid academic year")?;
    if end != start + 1 {
        return Err("Academic year must span two consecutive years");
    }
    Ok(())
}

pub fn validate_grade_level(grade: i32) -> Result<(), &'static str> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err("Grade level must be between 0 (kindergarten) and 12");
    }
    Ok(())
}

/// 解析 `YYYY-MM-DD` 日期
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{value}', expected YYYY-MM-DD"))
}

/// 解析 `HH:MM` 时间
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| format!("Invalid time '{value}', expected HH:MM"))
}

/// 校验必填文本字段，返回去除首尾空白后的值
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{field} must be at most {max_len} characters"));
    }
    Ok(trimmed.to_string())
}

/// 可选文本字段：空白视为未填写
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
        "School123",
        "Welcome1",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(validate_username("admin_01").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("a".repeat(17).as_str()).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("office@greenfield.edu").is_ok());
        assert!(validate_email("no-at-sign.edu").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_code() {
        assert!(validate_code("greenfield").is_ok());
        assert!(validate_code("north-campus-2").is_ok());
        assert!(validate_code("x").is_err());
        assert!(validate_code("Upper").is_err());
        assert!(validate_code("-edge").is_err());
        assert!(validate_code("edge-").is_err());
    }

    #[test]
    fn test_subject_code_is_normalized() {
        assert_eq!(normalize_subject_code(" Physics ").unwrap(), "physics");
        assert_eq!(
            normalize_subject_code("Computer Science").unwrap(),
            "computer_science"
        );
        assert!(normalize_subject_code("x").is_err());
        assert!(normalize_subject_code("maths!").is_err());
    }

    #[test]
    fn test_academic_year() {
        assert!(validate_academic_year("2025-2026").is_ok());
        assert!(validate_academic_year("2025-2027").is_err());
        assert!(validate_academic_year("2025/2026").is_err());
        assert!(validate_academic_year("25-26").is_err());
    }

    #[test]
    fn test_grade_level() {
        assert!(validate_grade_level(0).is_ok());
        assert!(validate_grade_level(12).is_ok());
        assert!(validate_grade_level(13).is_err());
        assert!(validate_grade_level(-1).is_err());
    }

    #[test]
    fn test_dates_and_times() {
        assert!(parse_date("2026-02-28").is_ok());
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("28/02/2026").is_err());
        assert!(parse_time("08:30").is_ok());
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("8h30").is_err());
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(require_text("name", "  Ana ", 10).unwrap(), "Ana");
        assert!(require_text("name", "   ", 10).is_err());
        assert!(require_text("name", "abcdef", 5).is_err());
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" x ".to_string())), Some("x".to_string()));
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_password_rules() {
        let result = validate_password("Ab1");
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(!validate_password("abcd1234").is_valid);
        assert!(!validate_password("ABCD1234").is_valid);
        assert!(!validate_password("AbcdEfgh").is_valid);
        let common = validate_password("Password1");
        assert!(
            common
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
