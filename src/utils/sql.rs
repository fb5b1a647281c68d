use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 通配符，使用户输入按字面匹配
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 构造“包含”匹配表达式（带 ESCAPE 子句）
pub fn contains_pattern(search: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(search))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("ana"), "ana");
        assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
    }
}
