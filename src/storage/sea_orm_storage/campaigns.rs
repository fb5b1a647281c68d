use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::campaigns::{ActiveModel, Column, Entity as Campaigns, Model};
use crate::entity::{enrollments, messages, sections, students};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    campaigns::{
        entities::{Audience, Campaign, CampaignStatus},
        requests::{CampaignListParams, CreateCampaignRequest, UpdateCampaignRequest},
        responses::SendCampaignResponse,
    },
    enrollments::entities::EnrollmentStatus,
    messages::entities::MessageStatus,
    students::entities::StudentStatus,
};
use crate::storage::{CampaignSend, CampaignStorage, CampaignWrite};
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, sea_query::Query,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "status" => Some(Column::Status),
        "sent_at" => Some(Column::SentAt),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

fn is_draft(model: &Model) -> bool {
    model.status == CampaignStatus::Draft.to_string()
}

/// 解析通知对象：校区全部在读学生，或在指定班级/分组有有效注册的在读学生
async fn resolve_audience<C: ConnectionTrait>(
    conn: &C,
    branch_id: i64,
    campaign: &Model,
) -> Result<Vec<students::Model>> {
    let audience = campaign
        .audience
        .parse::<Audience>()
        .unwrap_or(Audience::AllStudents);

    let mut select = students::Entity::find()
        .filter(students::Column::BranchId.eq(branch_id))
        .filter(students::Column::Status.eq(StudentStatus::Active.to_string()));

    let section_ids: Option<Vec<i64>> = match (audience, campaign.audience_ref_id) {
        (Audience::AllStudents, _) => None,
        (Audience::Section, Some(section_id)) => Some(vec![section_id]),
        (Audience::Class, Some(class_id)) => Some(
            sections::Entity::find()
                .select_only()
                .column(sections::Column::Id)
                .filter(sections::Column::BranchId.eq(branch_id))
                .filter(sections::Column::ClassId.eq(class_id))
                .into_tuple()
                .all(conn)
                .await
                .map_err(db_error("Failed to load sections"))?,
        ),
        (_, None) => Some(Vec::new()),
    };

    if let Some(section_ids) = section_ids {
        if section_ids.is_empty() {
            return Ok(Vec::new());
        }
        let enrolled = Query::select()
            .column(enrollments::Column::StudentId)
            .from(enrollments::Entity)
            .and_where(enrollments::Column::BranchId.eq(branch_id))
            .and_where(enrollments::Column::SectionId.is_in(section_ids))
            .and_where(enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .to_owned();
        select = select.filter(students::Column::Id.in_subquery(enrolled));
    }

    select
        .order_by_asc(students::Column::Id)
        .all(conn)
        .await
        .map_err(db_error("Failed to resolve campaign audience"))
}

impl SeaOrmStorage {
    async fn find_branch_campaign(&self, branch_id: i64, id: i64) -> Result<Option<Model>> {
        Campaigns::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load campaign"))
    }
}

#[async_trait]
impl CampaignStorage for SeaOrmStorage {
    async fn create_campaign(
        &self,
        branch_id: i64,
        req: CreateCampaignRequest,
    ) -> Result<Campaign> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            name: Set(req.name),
            channel: Set(req.channel.to_string()),
            subject: Set(req.subject),
            body: Set(req.body),
            audience: Set(req.audience.to_string()),
            audience_ref_id: Set(req.audience_ref_id),
            status: Set(CampaignStatus::Draft.to_string()),
            sent_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create campaign"))?;

        Ok(result.into_campaign())
    }

    async fn get_campaign(&self, branch_id: i64, id: i64) -> Result<Option<Campaign>> {
        Ok(self
            .find_branch_campaign(branch_id, id)
            .await?
            .map(|m| m.into_campaign()))
    }

    async fn list_campaigns_with_pagination(
        &self,
        branch_id: i64,
        params: CampaignListParams,
    ) -> Result<PaginatedResponse<Campaign>> {
        let mut select = Campaigns::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(Column::Name.like(contains_pattern(search)));
        }
        if let Some(ref status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(ref channel) = params.channel {
            select = select.filter(Column::Channel.eq(channel.to_string()));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list campaigns", |m| {
            m.into_campaign()
        })
        .await
    }

    async fn update_campaign(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateCampaignRequest,
    ) -> Result<CampaignWrite<Campaign>> {
        let Some(existing) = self.find_branch_campaign(branch_id, id).await? else {
            return Ok(CampaignWrite::NotFound);
        };
        if !is_draft(&existing) {
            return Ok(CampaignWrite::AlreadySent);
        }

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(channel) = update.channel {
            model.channel = Set(channel.to_string());
        }
        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(body) = update.body {
            model.body = Set(body);
        }
        if let Some(audience) = update.audience {
            model.audience = Set(audience.to_string());
        }
        if let Some(audience_ref_id) = update.audience_ref_id {
            model.audience_ref_id = Set(audience_ref_id);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update campaign"))?;

        Ok(CampaignWrite::Done(updated.into_campaign()))
    }

    async fn delete_campaign(&self, branch_id: i64, id: i64) -> Result<CampaignWrite<()>> {
        let Some(existing) = self.find_branch_campaign(branch_id, id).await? else {
            return Ok(CampaignWrite::NotFound);
        };
        if !is_draft(&existing) {
            return Ok(CampaignWrite::AlreadySent);
        }

        Campaigns::delete_many()
            .filter(Column::Id.eq(existing.id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete campaign"))?;

        Ok(CampaignWrite::Done(()))
    }

    async fn send_campaign(&self, branch_id: i64, id: i64) -> Result<CampaignSend> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let Some(campaign) = Campaigns::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&txn)
            .await
            .map_err(db_error("Failed to load campaign"))?
        else {
            return Ok(CampaignSend::NotFound);
        };
        if !is_draft(&campaign) {
            return Ok(CampaignSend::AlreadySent);
        }

        let audience = resolve_audience(&txn, branch_id, &campaign).await?;
        let channel = campaign.clone().into_campaign().channel;
        let now = now_ts();

        let mut skipped = 0;
        let mut queued = Vec::with_capacity(audience.len());
        for student in audience {
            let student = student.into_student();
            let Some(recipient) = student.contact_for(&channel) else {
                skipped += 1;
                continue;
            };
            queued.push(messages::ActiveModel {
                branch_id: Set(branch_id),
                campaign_id: Set(Some(campaign.id)),
                student_id: Set(Some(student.id)),
                recipient: Set(recipient),
                channel: Set(campaign.channel.clone()),
                subject: Set(campaign.subject.clone()),
                body: Set(campaign.body.clone()),
                status: Set(MessageStatus::Queued.to_string()),
                sent_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            });
        }

        if queued.is_empty() {
            return Ok(CampaignSend::NoRecipients);
        }
        let queued_count = queued.len() as i64;

        messages::Entity::insert_many(queued)
            .exec(&txn)
            .await
            .map_err(db_error("Failed to queue messages"))?;

        let mut model: ActiveModel = campaign.into();
        model.status = Set(CampaignStatus::Sent.to_string());
        model.sent_at = Set(Some(now));
        model.updated_at = Set(now);
        let sent = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to mark campaign sent"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit campaign"))?;

        Ok(CampaignSend::Sent(SendCampaignResponse {
            campaign: sent.into_campaign(),
            queued: queued_count,
            skipped,
        }))
    }
}
