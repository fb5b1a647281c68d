use std::collections::HashMap;

use super::{SeaOrmStorage, apply_sort, db_error, fetch_page, now_ts};
use crate::entity::exams;
use crate::entity::marks::{ActiveModel, Column, Entity as Marks};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    exams::entities::Exam,
    marks::{
        entities::Mark,
        requests::{BulkMarkEntry, CreateMarkRequest, MarkListParams, UpdateMarkRequest},
        responses::BulkMarksResponse,
    },
};
use crate::storage::MarkStorage;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "exam_id" => Some(Column::ExamId),
        "student_id" => Some(Column::StudentId),
        "marks_obtained" => Some(Column::MarksObtained),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

#[async_trait]
impl MarkStorage for SeaOrmStorage {
    async fn create_mark(
        &self,
        branch_id: i64,
        exam: &Exam,
        req: CreateMarkRequest,
    ) -> Result<Mark> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            exam_id: Set(exam.id),
            student_id: Set(req.student_id),
            marks_obtained: Set(req.marks_obtained),
            remarks: Set(req.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create mark"))?;

        Ok(result.into_mark(exam.max_marks, exam.pass_marks))
    }

    async fn get_mark(&self, branch_id: i64, id: i64) -> Result<Option<Mark>> {
        let result = Marks::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .find_also_related(exams::Entity)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load mark"))?;

        Ok(result.and_then(|(mark, exam)| {
            exam.map(|exam| mark.into_mark(exam.max_marks, exam.pass_marks))
        }))
    }

    async fn list_marks_with_pagination(
        &self,
        branch_id: i64,
        params: MarkListParams,
    ) -> Result<PaginatedResponse<Mark>> {
        let mut select = Marks::find().filter(Column::BranchId.eq(branch_id));

        if let Some(exam_id) = params.exam_id {
            select = select.filter(Column::ExamId.eq(exam_id));
        }
        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        let (models, page, size, total) =
            fetch_page(&self.db, select, &params.list, "Failed to list marks").await?;

        // 派生字段需要所属考试的满分与及格线
        let exam_ids: Vec<i64> = models.iter().map(|m| m.exam_id).collect();
        let limits: HashMap<i64, (f64, f64)> = exams::Entity::find()
            .filter(exams::Column::Id.is_in(exam_ids))
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load exams"))?
            .into_iter()
            .map(|e| (e.id, (e.max_marks, e.pass_marks)))
            .collect();

        let items = models
            .into_iter()
            .filter_map(|m| {
                let (max_marks, pass_marks) = *limits.get(&m.exam_id)?;
                Some(m.into_mark(max_marks, pass_marks))
            })
            .collect();

        Ok(PaginatedResponse::new(items, page, size, total))
    }

    async fn list_marks_for_exam(&self, branch_id: i64, exam: &Exam) -> Result<Vec<Mark>> {
        let models = Marks::find()
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::ExamId.eq(exam.id))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load marks"))?;

        Ok(models
            .into_iter()
            .map(|m| m.into_mark(exam.max_marks, exam.pass_marks))
            .collect())
    }

    async fn update_mark(
        &self,
        branch_id: i64,
        exam: &Exam,
        id: i64,
        update: UpdateMarkRequest,
    ) -> Result<Option<Mark>> {
        let Some(existing) = Marks::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::ExamId.eq(exam.id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load mark"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if let Some(marks_obtained) = update.marks_obtained {
            model.marks_obtained = Set(marks_obtained);
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(remarks);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update mark"))?;

        Ok(Some(updated.into_mark(exam.max_marks, exam.pass_marks)))
    }

    async fn delete_mark(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Marks::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete mark"))?;

        Ok(result.rows_affected > 0)
    }

    async fn bulk_upsert_marks(
        &self,
        branch_id: i64,
        exam: &Exam,
        entries: Vec<BulkMarkEntry>,
    ) -> Result<BulkMarksResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let now = now_ts();
        let mut created = 0;
        let mut updated = 0;
        let mut items = Vec::with_capacity(entries.len());

        for entry in entries {
            let existing = Marks::find()
                .filter(Column::BranchId.eq(branch_id))
                .filter(Column::ExamId.eq(exam.id))
                .filter(Column::StudentId.eq(entry.student_id))
                .one(&txn)
                .await
                .map_err(db_error("Failed to load mark"))?;

            let saved = match existing {
                Some(existing) => {
                    let mut model: ActiveModel = existing.into();
                    model.marks_obtained = Set(entry.marks_obtained);
                    model.remarks = Set(entry.remarks);
                    model.updated_at = Set(now);
                    updated += 1;
                    model
                        .update(&txn)
                        .await
                        .map_err(db_error("Failed to update mark"))?
                }
                None => {
                    let model = ActiveModel {
                        branch_id: Set(branch_id),
                        exam_id: Set(exam.id),
                        student_id: Set(entry.student_id),
                        marks_obtained: Set(entry.marks_obtained),
                        remarks: Set(entry.remarks),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    created += 1;
                    model
                        .insert(&txn)
                        .await
                        .map_err(db_error("Failed to create mark"))?
                }
            };
            items.push(saved.into_mark(exam.max_marks, exam.pass_marks));
        }

        txn.commit()
            .await
            .map_err(db_error("Failed to commit marks"))?;

        Ok(BulkMarksResponse {
            exam_id: exam.id,
            created,
            updated,
            items,
        })
    }
}
