use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Model};
use crate::entity::{exams, sections, timetable_periods};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    classes::{
        entities::Class,
        requests::{ClassListParams, CreateClassRequest, UpdateClassRequest},
    },
};
use crate::storage::ClassStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
    sea_query::Query,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "grade_level" => Some(Column::GradeLevel),
        "academic_year" => Some(Column::AcademicYear),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

impl SeaOrmStorage {
    async fn find_branch_class(&self, branch_id: i64, id: i64) -> Result<Option<Model>> {
        Classes::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load class"))
    }
}

#[async_trait]
impl ClassStorage for SeaOrmStorage {
    async fn create_class(&self, branch_id: i64, req: CreateClassRequest) -> Result<Class> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            name: Set(req.name),
            grade_level: Set(req.grade_level),
            academic_year: Set(req.academic_year),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create class"))?;

        Ok(result.into_class())
    }

    async fn get_class(&self, branch_id: i64, id: i64) -> Result<Option<Class>> {
        Ok(self
            .find_branch_class(branch_id, id)
            .await?
            .map(|m| m.into_class()))
    }

    async fn list_classes_with_pagination(
        &self,
        branch_id: i64,
        params: ClassListParams,
    ) -> Result<PaginatedResponse<Class>> {
        let mut select = Classes::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(Column::Name.like(contains_pattern(search)));
        }
        if let Some(grade_level) = params.grade_level {
            select = select.filter(Column::GradeLevel.eq(grade_level));
        }
        if let Some(ref academic_year) = params.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list classes", |m| {
            m.into_class()
        })
        .await
    }

    async fn update_class(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let Some(existing) = self.find_branch_class(branch_id, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(grade_level);
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update class"))?;

        Ok(Some(updated.into_class()))
    }

    async fn delete_class(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Classes::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete class"))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_sections_in_class(&self, branch_id: i64, class_id: i64) -> Result<u64> {
        sections::Entity::find()
            .filter(sections::Column::BranchId.eq(branch_id))
            .filter(sections::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count sections"))
    }

    async fn list_class_subject_ids(&self, branch_id: i64, class_id: i64) -> Result<Vec<i64>> {
        let mut ids: Vec<i64> = exams::Entity::find()
            .select_only()
            .column(exams::Column::SubjectId)
            .filter(exams::Column::BranchId.eq(branch_id))
            .filter(exams::Column::ClassId.eq(class_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load exam subjects"))?;

        let class_sections = Query::select()
            .column(sections::Column::Id)
            .from(sections::Entity)
            .and_where(sections::Column::BranchId.eq(branch_id))
            .and_where(sections::Column::ClassId.eq(class_id))
            .to_owned();
        let scheduled: Vec<i64> = timetable_periods::Entity::find()
            .select_only()
            .column(timetable_periods::Column::SubjectId)
            .filter(timetable_periods::Column::BranchId.eq(branch_id))
            .filter(timetable_periods::Column::SectionId.in_subquery(class_sections))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load timetable subjects"))?;

        ids.extend(scheduled);
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }
}
