use super::entities::{UserRole, UserStatus};
use crate::models::common::{ListQuery, deserialize_nullable, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

// 用户列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub tenant_id: Option<i64>,
}

// 用户创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// 租户（超级管理员创建其他租户用户时必填，租户管理员忽略此字段）
    pub tenant_id: Option<i64>,
    pub display_name: Option<String>,
}

// 用户更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub display_name: Option<Option<String>>,
}
