use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::campaigns::entities::Channel;

crate::define_string_enum! {
    /// 消息投递状态
    MessageStatus, "../admin/src/types/generated/communication.ts" {
        Queued => "queued",
        Sent => "sent",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct Message {
    pub id: i64,
    pub branch_id: i64,
    pub campaign_id: Option<i64>,
    pub student_id: Option<i64>,
    pub recipient: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
    pub status: MessageStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
