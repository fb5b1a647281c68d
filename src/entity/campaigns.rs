//! 通知活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub branch_id: i64,
    pub name: String,
    pub channel: String,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub audience: String,
    pub audience_ref_id: Option<i64>,
    pub status: String,
    pub sent_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_campaign(self) -> crate::models::campaigns::entities::Campaign {
        use crate::models::campaigns::entities::{Audience, Campaign, CampaignStatus, Channel};

        Campaign {
            id: self.id,
            branch_id: self.branch_id,
            name: self.name,
            channel: self.channel.parse::<Channel>().unwrap_or(Channel::InApp),
            subject: self.subject,
            body: self.body,
            audience: self
                .audience
                .parse::<Audience>()
                .unwrap_or(Audience::AllStudents),
            audience_ref_id: self.audience_ref_id,
            status: self
                .status
                .parse::<CampaignStatus>()
                .unwrap_or(CampaignStatus::Draft),
            sent_at: self.sent_at.map(super::timestamp),
            created_at: super::timestamp(self.created_at),
            updated_at: super::timestamp(self.updated_at),
        }
    }
}
