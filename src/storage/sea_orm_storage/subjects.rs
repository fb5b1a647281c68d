use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects, Model};
use crate::entity::{classes, exams, sections, timetable_periods};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest},
    },
};
use crate::storage::SubjectStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, sea_query::Query,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "code" => Some(Column::Code),
        "name" => Some(Column::Name),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

impl SeaOrmStorage {
    async fn find_branch_subject(&self, branch_id: i64, id: i64) -> Result<Option<Model>> {
        Subjects::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load subject"))
    }
}

#[async_trait]
impl SubjectStorage for SeaOrmStorage {
    async fn create_subject(&self, branch_id: i64, req: CreateSubjectRequest) -> Result<Subject> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            code: Set(req.code),
            name: Set(req.name),
            min_grade: Set(req.min_grade),
            max_grade: Set(req.max_grade),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create subject"))?;

        Ok(result.into_subject())
    }

    async fn get_subject(&self, branch_id: i64, id: i64) -> Result<Option<Subject>> {
        Ok(self
            .find_branch_subject(branch_id, id)
            .await?
            .map(|m| m.into_subject()))
    }

    async fn list_subjects_with_pagination(
        &self,
        branch_id: i64,
        params: SubjectListParams,
    ) -> Result<PaginatedResponse<Subject>> {
        let mut select = Subjects::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(
                Condition::any()
                    .add(Column::Code.like(contains_pattern(search)))
                    .add(Column::Name.like(contains_pattern(search))),
            );
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list subjects", |m| {
            m.into_subject()
        })
        .await
    }

    async fn list_all_subjects(&self, branch_id: i64) -> Result<Vec<Subject>> {
        let models = Subjects::find()
            .filter(Column::BranchId.eq(branch_id))
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list subjects"))?;

        Ok(models.into_iter().map(|m| m.into_subject()).collect())
    }

    async fn update_subject(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let Some(existing) = self.find_branch_subject(branch_id, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(min_grade) = update.min_grade {
            model.min_grade = Set(min_grade);
        }
        if let Some(max_grade) = update.max_grade {
            model.max_grade = Set(max_grade);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update subject"))?;

        Ok(Some(updated.into_subject()))
    }

    async fn delete_subject(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Subjects::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete subject"))?;

        Ok(result.rows_affected > 0)
    }

    async fn list_subject_grade_levels(&self, branch_id: i64, subject_id: i64) -> Result<Vec<i32>> {
        let examined = Query::select()
            .column(exams::Column::ClassId)
            .from(exams::Entity)
            .and_where(exams::Column::BranchId.eq(branch_id))
            .and_where(exams::Column::SubjectId.eq(subject_id))
            .to_owned();
        let scheduled_sections = Query::select()
            .column(timetable_periods::Column::SectionId)
            .from(timetable_periods::Entity)
            .and_where(timetable_periods::Column::BranchId.eq(branch_id))
            .and_where(timetable_periods::Column::SubjectId.eq(subject_id))
            .to_owned();
        let scheduled = Query::select()
            .column(sections::Column::ClassId)
            .from(sections::Entity)
            .and_where(sections::Column::Id.in_subquery(scheduled_sections))
            .to_owned();

        let mut grades: Vec<i32> = classes::Entity::find()
            .select_only()
            .column(classes::Column::GradeLevel)
            .filter(classes::Column::BranchId.eq(branch_id))
            .filter(
                Condition::any()
                    .add(classes::Column::Id.in_subquery(examined))
                    .add(classes::Column::Id.in_subquery(scheduled)),
            )
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load subject grade levels"))?;

        grades.sort_unstable();
        grades.dedup();
        Ok(grades)
    }
}
