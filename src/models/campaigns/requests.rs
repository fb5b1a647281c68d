use super::entities::{Audience, CampaignStatus, Channel};
use crate::models::common::{ListQuery, deserialize_nullable};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct CampaignListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    pub status: Option<CampaignStatus>,
    pub channel: Option<Channel>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct CreateCampaignRequest {
    pub name: String,
    pub channel: Channel,
    pub subject: Option<String>,
    pub body: String,
    pub audience: Audience,
    pub audience_ref_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/communication.ts")]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub channel: Option<Channel>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub subject: Option<Option<String>>,
    pub body: Option<String>,
    pub audience: Option<Audience>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub audience_ref_id: Option<Option<i64>>,
}
