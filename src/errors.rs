//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::http::StatusCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    TenantScope("E014", "Tenant Scope Error"),
}

impl SchoolError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => StatusCode::BAD_REQUEST,
            SchoolError::NotFound(_) => StatusCode::NOT_FOUND,
            SchoolError::Conflict(_) => StatusCode::CONFLICT,
            SchoolError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SchoolError::Authorization(_) | SchoolError::TenantScope(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为服务端内部错误（需要记录日志且不向客户端暴露细节）
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::SqlErr;
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                SchoolError::Conflict(format!("Duplicate record: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                SchoolError::Conflict(format!("Record is still referenced: {detail}"))
            }
            _ => SchoolError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for SchoolError {
    fn from(err: std::io::Error) -> Self {
        SchoolError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::cache_connection("test").code(), "E001");
        assert_eq!(SchoolError::database_config("test").code(), "E003");
        assert_eq!(SchoolError::validation("test").code(), "E007");
        assert_eq!(SchoolError::conflict("test").code(), "E010");
        assert_eq!(SchoolError::tenant_scope("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SchoolError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SchoolError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SchoolError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SchoolError::tenant_scope("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert!(SchoolError::database_operation("x").is_internal());
        assert!(!SchoolError::validation("x").is_internal());
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::validation("Invalid grade level");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid grade level"));
    }
}
