use super::entities::MessageStatus;
use crate::models::campaigns::entities::Channel;
use crate::models::common::{ListQuery, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct MessageListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub campaign_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    pub status: Option<MessageStatus>,
}

// 直接发给某个学生（监护人）的消息
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct CreateMessageRequest {
    pub student_id: i64,
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct UpdateMessageStatusRequest {
    pub status: MessageStatus,
}
