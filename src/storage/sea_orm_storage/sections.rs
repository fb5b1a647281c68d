use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::enrollments;
use crate::entity::sections::{ActiveModel, Column, Entity as Sections, Model};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    enrollments::entities::EnrollmentStatus,
    sections::{
        entities::Section,
        requests::{CreateSectionRequest, SectionListParams, UpdateSectionRequest},
    },
};
use crate::storage::SectionStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "class_id" => Some(Column::ClassId),
        "capacity" => Some(Column::Capacity),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

impl SeaOrmStorage {
    async fn find_branch_section(&self, branch_id: i64, id: i64) -> Result<Option<Model>> {
        Sections::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load section"))
    }
}

#[async_trait]
impl SectionStorage for SeaOrmStorage {
    async fn create_section(&self, branch_id: i64, req: CreateSectionRequest) -> Result<Section> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            class_id: Set(req.class_id),
            name: Set(req.name),
            capacity: Set(req.capacity),
            class_teacher_id: Set(req.class_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create section"))?;

        Ok(result.into_section())
    }

    async fn get_section(&self, branch_id: i64, id: i64) -> Result<Option<Section>> {
        Ok(self
            .find_branch_section(branch_id, id)
            .await?
            .map(|m| m.into_section()))
    }

    async fn list_sections_with_pagination(
        &self,
        branch_id: i64,
        params: SectionListParams,
    ) -> Result<PaginatedResponse<Section>> {
        let mut select = Sections::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(Column::Name.like(contains_pattern(search)));
        }
        if let Some(class_id) = params.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list sections", |m| {
            m.into_section()
        })
        .await
    }

    async fn update_section(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>> {
        let Some(existing) = self.find_branch_section(branch_id, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(class_teacher_id) = update.class_teacher_id {
            model.class_teacher_id = Set(class_teacher_id);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update section"))?;

        Ok(Some(updated.into_section()))
    }

    async fn delete_section(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Sections::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete section"))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_active_enrollments(&self, branch_id: i64, section_id: i64) -> Result<u64> {
        enrollments::Entity::find()
            .filter(enrollments::Column::BranchId.eq(branch_id))
            .filter(enrollments::Column::SectionId.eq(section_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count enrollments"))
    }
}
