//! 数据模型
//!
//! 按资源划分：`entities` 为对外暴露的业务实体，`requests` 为请求体与查询参数，
//! `responses` 为组合响应。所有类型通过 ts-rs 导出到管理后台。

pub mod attendance;
pub mod auth;
pub mod branches;
pub mod campaigns;
pub mod classes;
pub mod common;
pub mod dashboard;
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
pub mod system;
pub mod teachers;
pub mod tenants;
pub mod timetables;
pub mod users;

pub use common::*;

/// 服务启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
