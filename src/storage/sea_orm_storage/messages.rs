use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::messages::{ActiveModel, Column, Entity as Messages};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    messages::{
        entities::{Message, MessageStatus},
        requests::{CreateMessageRequest, MessageListParams},
    },
};
use crate::storage::MessageStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "status" => Some(Column::Status),
        "channel" => Some(Column::Channel),
        "sent_at" => Some(Column::SentAt),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

#[async_trait]
impl MessageStorage for SeaOrmStorage {
    async fn create_message(
        &self,
        branch_id: i64,
        recipient: String,
        req: CreateMessageRequest,
    ) -> Result<Message> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            campaign_id: Set(None),
            student_id: Set(Some(req.student_id)),
            recipient: Set(recipient),
            channel: Set(req.channel.to_string()),
            subject: Set(req.subject),
            body: Set(req.body),
            status: Set(MessageStatus::Queued.to_string()),
            sent_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create message"))?;

        Ok(result.into_message())
    }

    async fn get_message(&self, branch_id: i64, id: i64) -> Result<Option<Message>> {
        let result = Messages::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load message"))?;

        Ok(result.map(|m| m.into_message()))
    }

    async fn list_messages_with_pagination(
        &self,
        branch_id: i64,
        params: MessageListParams,
    ) -> Result<PaginatedResponse<Message>> {
        let mut select = Messages::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(
                Condition::any()
                    .add(Column::Recipient.like(contains_pattern(search)))
                    .add(Column::Subject.like(contains_pattern(search))),
            );
        }
        if let Some(campaign_id) = params.campaign_id {
            select = select.filter(Column::CampaignId.eq(campaign_id));
        }
        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list messages", |m| {
            m.into_message()
        })
        .await
    }

    async fn update_message_status(
        &self,
        branch_id: i64,
        id: i64,
        status: MessageStatus,
    ) -> Result<Option<Message>> {
        let Some(existing) = Messages::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load message"))?
        else {
            return Ok(None);
        };

        let now = now_ts();
        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now);
        model.sent_at = Set(match status {
            MessageStatus::Sent => Some(now),
            _ => None,
        });
        model.status = Set(status.to_string());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update message"))?;

        Ok(Some(updated.into_message()))
    }
}
