//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

use chrono::{DateTime, Utc};

pub mod prelude;

pub mod attendance_records;
pub mod attendance_sessions;
pub mod branches;
pub mod campaigns;
pub mod classes;
pub mod enrollments;
pub mod exams;
pub mod fee_structures;
pub mod invoices;
pub mod marks;
pub mod messages;
pub mod payments;
pub mod sections;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod tenants;
pub mod timetable_periods;
pub mod users;

/// 数据库中的秒级时间戳转为 UTC 时间
pub(crate) fn timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
