use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::timetable_periods::{ActiveModel, Column, Entity as Periods, Model};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    timetables::{
        entities::TimetablePeriod,
        requests::{
            CreateTimetablePeriodRequest, TimetableListParams, UpdateTimetablePeriodRequest,
        },
    },
};
use crate::storage::TimetableStorage;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "day_of_week" => Some(Column::DayOfWeek),
        "start_time" => Some(Column::StartTime),
        "section_id" => Some(Column::SectionId),
        "teacher_id" => Some(Column::TeacherId),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

impl SeaOrmStorage {
    async fn find_branch_period(&self, branch_id: i64, id: i64) -> Result<Option<Model>> {
        Periods::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load timetable period"))
    }
}

#[async_trait]
impl TimetableStorage for SeaOrmStorage {
    async fn create_period(
        &self,
        branch_id: i64,
        req: CreateTimetablePeriodRequest,
    ) -> Result<TimetablePeriod> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            section_id: Set(req.section_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            day_of_week: Set(req.day_of_week),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create timetable period"))?;

        Ok(result.into_period())
    }

    async fn get_period(&self, branch_id: i64, id: i64) -> Result<Option<TimetablePeriod>> {
        Ok(self
            .find_branch_period(branch_id, id)
            .await?
            .map(|m| m.into_period()))
    }

    async fn list_periods_with_pagination(
        &self,
        branch_id: i64,
        params: TimetableListParams,
    ) -> Result<PaginatedResponse<TimetablePeriod>> {
        let mut select = Periods::find().filter(Column::BranchId.eq(branch_id));

        if let Some(section_id) = params.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(teacher_id) = params.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(day) = params.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(
            &self.db,
            select,
            &params.list,
            "Failed to list timetable periods",
            |m| m.into_period(),
        )
        .await
    }

    async fn list_periods_on_day(
        &self,
        branch_id: i64,
        day_of_week: i32,
    ) -> Result<Vec<TimetablePeriod>> {
        let models = Periods::find()
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::DayOfWeek.eq(day_of_week))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load timetable periods"))?;

        Ok(models.into_iter().map(|m| m.into_period()).collect())
    }

    async fn list_section_periods(
        &self,
        branch_id: i64,
        section_id: i64,
    ) -> Result<Vec<TimetablePeriod>> {
        let models = Periods::find()
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::SectionId.eq(section_id))
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load timetable periods"))?;

        Ok(models.into_iter().map(|m| m.into_period()).collect())
    }

    async fn update_period(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateTimetablePeriodRequest,
    ) -> Result<Option<TimetablePeriod>> {
        let Some(existing) = self.find_branch_period(branch_id, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());

        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        if let Some(day_of_week) = update.day_of_week {
            model.day_of_week = Set(day_of_week);
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time);
        }
        if let Some(room) = update.room {
            model.room = Set(room);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update timetable period"))?;

        Ok(Some(updated.into_period()))
    }

    async fn delete_period(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Periods::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete timetable period"))?;

        Ok(result.rows_affected > 0)
    }
}
