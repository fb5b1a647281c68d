use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::campaigns::entities::Channel;

crate::define_string_enum! {
    /// 学生状态
    StudentStatus, "../admin/src/types/generated/student.ts" {
        Active => "active",
        Inactive => "inactive",
        Graduated => "graduated",
        Transferred => "transferred",
    }
}

crate::define_string_enum! {
    /// 性别
    Gender, "../admin/src/types/generated/student.ts" {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub branch_id: i64,
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 该渠道下的收件地址，监护人未留联系方式时为空
    pub fn contact_for(&self, channel: &Channel) -> Option<String> {
        let contact = match channel {
            Channel::Email => self.guardian_email.as_deref(),
            Channel::Sms => self.guardian_phone.as_deref(),
            Channel::InApp => return Some(self.id.to_string()),
        };
        contact
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student {
            id: 42,
            branch_id: 1,
            admission_no: "ADM-001".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            gender: None,
            date_of_birth: None,
            guardian_name: None,
            guardian_phone: Some("  ".to_string()),
            guardian_email: Some("parent@example.com".to_string()),
            status: StudentStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_contact_for_channel() {
        let s = student();
        assert_eq!(
            s.contact_for(&Channel::Email).as_deref(),
            Some("parent@example.com")
        );
        assert_eq!(s.contact_for(&Channel::Sms), None);
        assert_eq!(s.contact_for(&Channel::InApp).as_deref(), Some("42"));
        assert_eq!(s.full_name(), "Asha Rao");
    }
}
