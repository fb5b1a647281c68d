use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 通知渠道
    Channel, "../admin/src/types/generated/communication.ts" {
        Email => "email",
        Sms => "sms",
        InApp => "in_app",
    }
}

crate::define_string_enum! {
    /// 通知对象
    Audience, "../admin/src/types/generated/communication.ts" {
        AllStudents => "all_students",
        Class => "class",
        Section => "section",
    }
}

impl Audience {
    /// 是否需要 audience_ref_id（班级或分组 ID）
    pub fn requires_ref(&self) -> bool {
        !matches!(self, Audience::AllStudents)
    }
}

crate::define_string_enum! {
    /// 通知活动状态
    CampaignStatus, "../admin/src/types/generated/communication.ts" {
        Draft => "draft",
        Sent => "sent",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct Campaign {
    pub id: i64,
    pub branch_id: i64,
    pub name: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
    pub audience: Audience,
    pub audience_ref_id: Option<i64>,
    pub status: CampaignStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
