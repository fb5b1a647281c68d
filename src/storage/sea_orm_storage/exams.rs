use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::exams::{ActiveModel, Column, Entity as Exams, Model};
use crate::entity::marks;
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    exams::{
        entities::Exam,
        requests::{CreateExamRequest, ExamListParams, UpdateExamRequest},
    },
};
use crate::storage::ExamStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "class_id" => Some(Column::ClassId),
        "subject_id" => Some(Column::SubjectId),
        "exam_date" => Some(Column::ExamDate),
        "max_marks" => Some(Column::MaxMarks),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

impl SeaOrmStorage {
    async fn find_branch_exam(&self, branch_id: i64, id: i64) -> Result<Option<Model>> {
        Exams::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load exam"))
    }
}

#[async_trait]
impl ExamStorage for SeaOrmStorage {
    async fn create_exam(&self, branch_id: i64, req: CreateExamRequest) -> Result<Exam> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            name: Set(req.name),
            exam_date: Set(req.exam_date),
            max_marks: Set(req.max_marks),
            pass_marks: Set(req.pass_marks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create exam"))?;

        Ok(result.into_exam())
    }

    async fn get_exam(&self, branch_id: i64, id: i64) -> Result<Option<Exam>> {
        Ok(self
            .find_branch_exam(branch_id, id)
            .await?
            .map(|m| m.into_exam()))
    }

    async fn list_exams_with_pagination(
        &self,
        branch_id: i64,
        params: ExamListParams,
    ) -> Result<PaginatedResponse<Exam>> {
        let mut select = Exams::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(Column::Name.like(contains_pattern(search)));
        }
        if let Some(class_id) = params.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = params.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list exams", |m| {
            m.into_exam()
        })
        .await
    }

    async fn update_exam(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>> {
        let Some(existing) = self.find_branch_exam(branch_id, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(exam_date) = update.exam_date {
            model.exam_date = Set(exam_date);
        }
        if let Some(max_marks) = update.max_marks {
            model.max_marks = Set(max_marks);
        }
        if let Some(pass_marks) = update.pass_marks {
            model.pass_marks = Set(pass_marks);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update exam"))?;

        Ok(Some(updated.into_exam()))
    }

    async fn delete_exam(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Exams::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete exam"))?;

        Ok(result.rows_affected > 0)
    }

    async fn highest_mark_for_exam(&self, branch_id: i64, exam_id: i64) -> Result<Option<f64>> {
        let obtained: Vec<f64> = marks::Entity::find()
            .select_only()
            .column(marks::Column::MarksObtained)
            .filter(marks::Column::BranchId.eq(branch_id))
            .filter(marks::Column::ExamId.eq(exam_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load marks"))?;

        Ok(obtained.into_iter().reduce(f64::max))
    }
}
