use serde::Serialize;
use ts_rs::TS;

use super::entities::Campaign;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct SendCampaignResponse {
    pub campaign: Campaign,
    /// 已生成的待发送消息数
    pub queued: i64,
    /// 缺少联系方式而跳过的学生数
    pub skipped: i64,
}
