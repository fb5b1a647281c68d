pub mod extractor;
pub mod grade_subjects;
pub mod grading;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod sql;
pub mod timetable;
pub mod validate;

pub use extractor::SafeIDI64;
pub use parameter_error_handler::{json_error_handler, query_error_handler};
pub use sql::{contains_pattern, escape_like_pattern};
