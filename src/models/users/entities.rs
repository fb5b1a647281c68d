use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 用户角色
    UserRole, "../admin/src/types/generated/user.ts" {
        SuperAdmin => "super_admin",
        Admin => "admin",
        Staff => "staff",
        Teacher => "teacher",
    }
}

impl UserRole {
    /// 平台管理员（不隶属任何租户）
    pub fn platform_roles() -> &'static [&'static UserRole] {
        &[&Self::SuperAdmin]
    }
    /// 租户管理员及以上
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::SuperAdmin, &Self::Admin]
    }
    /// 教务办公室（可写学校数据）
    pub fn office_roles() -> &'static [&'static UserRole] {
        &[&Self::SuperAdmin, &Self::Admin, &Self::Staff]
    }
    /// 可录入考勤与成绩
    pub fn teaching_roles() -> &'static [&'static UserRole] {
        &[&Self::SuperAdmin, &Self::Admin, &Self::Staff, &Self::Teacher]
    }

    pub fn is_super_admin(&self) -> bool {
        *self == UserRole::SuperAdmin
    }
}

crate::define_string_enum! {
    /// 用户状态
    UserStatus, "../admin/src/types/generated/user.ts" {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub tenant_id: Option<i64>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 当前用户能否管理指定租户下的数据
    pub fn can_access_tenant(&self, tenant_id: i64) -> bool {
        self.role.is_super_admin() || self.tenant_id == Some(tenant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, tenant_id: Option<i64>) -> User {
        User {
            id: 1,
            tenant_id,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_groups() {
        assert!(UserRole::office_roles().contains(&&UserRole::Staff));
        assert!(!UserRole::office_roles().contains(&&UserRole::Teacher));
        assert!(UserRole::teaching_roles().contains(&&UserRole::Teacher));
        assert_eq!(UserRole::platform_roles(), &[&UserRole::SuperAdmin]);
    }

    #[test]
    fn test_tenant_access() {
        assert!(user(UserRole::SuperAdmin, None).can_access_tenant(9));
        assert!(user(UserRole::Admin, Some(9)).can_access_tenant(9));
        assert!(!user(UserRole::Admin, Some(3)).can_access_tenant(9));
        assert!(!user(UserRole::Staff, None).can_access_tenant(9));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let mut u = user(UserRole::Teacher, Some(1));
        u.password_hash = "secret-hash".to_string();
        let json = serde_json::to_string(&u).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"teacher\""));
    }
}
