use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::attendance_records::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as Records,
};
use crate::entity::attendance_sessions::{ActiveModel, Column, Entity as Sessions};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    attendance::{
        entities::{AttendanceCounts, AttendanceRecord, AttendanceSession, AttendanceStatus},
        requests::{AttendanceListParams, AttendanceRecordInput, CreateAttendanceRequest},
    },
};
use crate::storage::AttendanceStorage;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "date" => Some(Column::Date),
        "section_id" => Some(Column::SectionId),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

async fn insert_records<C: ConnectionTrait>(
    conn: &C,
    session_id: i64,
    records: Vec<AttendanceRecordInput>,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let models = records.into_iter().map(|r| RecordActiveModel {
        session_id: Set(session_id),
        student_id: Set(r.student_id),
        status: Set(r.status.to_string()),
        remarks: Set(r.remarks),
        ..Default::default()
    });
    Records::insert_many(models)
        .exec(conn)
        .await
        .map_err(db_error("Failed to save attendance records"))?;
    Ok(())
}

async fn load_records<C: ConnectionTrait>(
    conn: &C,
    session_id: i64,
) -> Result<Vec<AttendanceRecord>> {
    let models = Records::find()
        .filter(RecordColumn::SessionId.eq(session_id))
        .order_by_asc(RecordColumn::StudentId)
        .all(conn)
        .await
        .map_err(db_error("Failed to load attendance records"))?;

    Ok(models.into_iter().map(|m| m.into_record()).collect())
}

#[async_trait]
impl AttendanceStorage for SeaOrmStorage {
    async fn create_attendance(
        &self,
        branch_id: i64,
        taken_by: Option<i64>,
        req: CreateAttendanceRequest,
    ) -> Result<(AttendanceSession, Vec<AttendanceRecord>)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let now = now_ts();
        let session = ActiveModel {
            branch_id: Set(branch_id),
            section_id: Set(req.section_id),
            date: Set(req.date),
            taken_by: Set(taken_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to create attendance session"))?;

        insert_records(&txn, session.id, req.records).await?;
        let records = load_records(&txn, session.id).await?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit attendance"))?;

        Ok((session.into_session(), records))
    }

    async fn find_attendance_session(
        &self,
        branch_id: i64,
        section_id: i64,
        date: &str,
    ) -> Result<Option<AttendanceSession>> {
        let result = Sessions::find()
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::SectionId.eq(section_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load attendance session"))?;

        Ok(result.map(|m| m.into_session()))
    }

    async fn get_attendance(
        &self,
        branch_id: i64,
        id: i64,
    ) -> Result<Option<(AttendanceSession, Vec<AttendanceRecord>)>> {
        let Some(session) = Sessions::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load attendance session"))?
        else {
            return Ok(None);
        };

        let records = load_records(&self.db, session.id).await?;
        Ok(Some((session.into_session(), records)))
    }

    async fn list_attendance_with_pagination(
        &self,
        branch_id: i64,
        params: AttendanceListParams,
    ) -> Result<PaginatedResponse<AttendanceSession>> {
        let mut select = Sessions::find().filter(Column::BranchId.eq(branch_id));

        if let Some(section_id) = params.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(ref from) = params.date_from {
            select = select.filter(Column::Date.gte(from.as_str()));
        }
        if let Some(ref to) = params.date_to {
            select = select.filter(Column::Date.lte(to.as_str()));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(
            &self.db,
            select,
            &params.list,
            "Failed to list attendance",
            |m| m.into_session(),
        )
        .await
    }

    async fn replace_attendance_records(
        &self,
        branch_id: i64,
        id: i64,
        taken_by: Option<i64>,
        records: Vec<AttendanceRecordInput>,
    ) -> Result<Option<(AttendanceSession, Vec<AttendanceRecord>)>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let Some(existing) = Sessions::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&txn)
            .await
            .map_err(db_error("Failed to load attendance session"))?
        else {
            return Ok(None);
        };

        Records::delete_many()
            .filter(RecordColumn::SessionId.eq(existing.id))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to clear attendance records"))?;
        insert_records(&txn, existing.id, records).await?;

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if taken_by.is_some() {
            model.taken_by = Set(taken_by);
        }
        let session = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to update attendance session"))?;

        let records = load_records(&txn, session.id).await?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit attendance"))?;

        Ok(Some((session.into_session(), records)))
    }

    async fn delete_attendance(&self, branch_id: i64, id: i64) -> Result<bool> {
        // 明细随场次级联删除
        let result = Sessions::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete attendance session"))?;

        Ok(result.rows_affected > 0)
    }

    async fn attendance_counts_on(&self, branch_id: i64, date: &str) -> Result<AttendanceCounts> {
        let statuses: Vec<String> = Records::find()
            .inner_join(Sessions)
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::Date.eq(date))
            .select_only()
            .column(RecordColumn::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load attendance"))?;

        Ok(statuses
            .iter()
            .filter_map(|s| s.parse::<AttendanceStatus>().ok())
            .collect())
    }
}
