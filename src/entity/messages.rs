//! 消息实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub branch_id: i64,
    pub campaign_id: Option<i64>,
    pub student_id: Option<i64>,
    pub recipient: String,
    pub channel: String,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub status: String,
    pub sent_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::campaigns::Entity",
        from = "Column::CampaignId",
        to = "super::campaigns::Column::Id"
    )]
    Campaign,
}

impl Related<super::campaigns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_message(self) -> crate::models::messages::entities::Message {
        use crate::models::campaigns::entities::Channel;
        use crate::models::messages::entities::{Message, MessageStatus};

        Message {
            id: self.id,
            branch_id: self.branch_id,
            campaign_id: self.campaign_id,
            student_id: self.student_id,
            recipient: self.recipient,
            channel: self.channel.parse::<Channel>().unwrap_or(Channel::InApp),
            subject: self.subject,
            body: self.body,
            status: self
                .status
                .parse::<MessageStatus>()
                .unwrap_or(MessageStatus::Queued),
            sent_at: self.sent_at.map(super::timestamp),
            created_at: super::timestamp(self.created_at),
            updated_at: super::timestamp(self.updated_at),
        }
    }
}
