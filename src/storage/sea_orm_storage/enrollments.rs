use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::sections;
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::{EnrollmentListParams, UpdateEnrollmentRequest},
    },
};
use crate::storage::{EnrollmentStorage, EnrollmentWrite, NewEnrollment};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "student_id" => Some(Column::StudentId),
        "section_id" => Some(Column::SectionId),
        "academic_year" => Some(Column::AcademicYear),
        "roll_number" => Some(Column::RollNumber),
        "status" => Some(Column::Status),
        "enrolled_at" => Some(Column::EnrolledAt),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

fn active() -> String {
    EnrollmentStatus::Active.to_string()
}

/// 激活一条注册前的检查：同一学年仅一条有效注册，分组有效人数不超过容量
async fn check_activation<C: ConnectionTrait>(
    conn: &C,
    branch_id: i64,
    student_id: i64,
    section_id: i64,
    academic_year: &str,
    exclude_id: Option<i64>,
) -> Result<Option<EnrollmentWrite>> {
    let Some(section) = sections::Entity::find_by_id(section_id)
        .filter(sections::Column::BranchId.eq(branch_id))
        .one(conn)
        .await
        .map_err(db_error("Failed to load section"))?
    else {
        return Ok(Some(EnrollmentWrite::NotFound));
    };

    let mut duplicate = Enrollments::find()
        .filter(Column::BranchId.eq(branch_id))
        .filter(Column::StudentId.eq(student_id))
        .filter(Column::AcademicYear.eq(academic_year))
        .filter(Column::Status.eq(active()));
    if let Some(id) = exclude_id {
        duplicate = duplicate.filter(Column::Id.ne(id));
    }
    let duplicates = duplicate
        .count(conn)
        .await
        .map_err(db_error("Failed to check enrollments"))?;
    if duplicates > 0 {
        return Ok(Some(EnrollmentWrite::AlreadyEnrolled));
    }

    let mut occupied = Enrollments::find()
        .filter(Column::BranchId.eq(branch_id))
        .filter(Column::SectionId.eq(section_id))
        .filter(Column::Status.eq(active()));
    if let Some(id) = exclude_id {
        occupied = occupied.filter(Column::Id.ne(id));
    }
    let occupied = occupied
        .count(conn)
        .await
        .map_err(db_error("Failed to count enrollments"))?;
    if occupied >= section.capacity.max(0) as u64 {
        return Ok(Some(EnrollmentWrite::SectionFull));
    }

    Ok(None)
}

#[async_trait]
impl EnrollmentStorage for SeaOrmStorage {
    async fn create_enrollment(
        &self,
        branch_id: i64,
        new: NewEnrollment,
    ) -> Result<EnrollmentWrite> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        if let Some(rejected) = check_activation(
            &txn,
            branch_id,
            new.student_id,
            new.section_id,
            &new.academic_year,
            None,
        )
        .await?
        {
            return Ok(rejected);
        }

        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            student_id: Set(new.student_id),
            section_id: Set(new.section_id),
            academic_year: Set(new.academic_year),
            roll_number: Set(new.roll_number),
            status: Set(active()),
            enrolled_at: Set(new.enrolled_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = model
            .insert(&txn)
            .await
            .map_err(db_error("Failed to create enrollment"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit enrollment"))?;

        Ok(EnrollmentWrite::Saved(created.into_enrollment()))
    }

    async fn get_enrollment(&self, branch_id: i64, id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load enrollment"))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    async fn list_enrollments_with_pagination(
        &self,
        branch_id: i64,
        params: EnrollmentListParams,
    ) -> Result<PaginatedResponse<Enrollment>> {
        let mut select = Enrollments::find().filter(Column::BranchId.eq(branch_id));

        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(section_id) = params.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(ref academic_year) = params.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }
        if let Some(ref status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(
            &self.db,
            select,
            &params.list,
            "Failed to list enrollments",
            |m| m.into_enrollment(),
        )
        .await
    }

    async fn update_enrollment(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<EnrollmentWrite> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let Some(existing) = Enrollments::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&txn)
            .await
            .map_err(db_error("Failed to load enrollment"))?
        else {
            return Ok(EnrollmentWrite::NotFound);
        };

        // 重新激活时需再次检查唯一性与容量
        let reactivating = update.status == Some(EnrollmentStatus::Active) && existing.status != active();
        if reactivating
            && let Some(rejected) = check_activation(
                &txn,
                branch_id,
                existing.student_id,
                existing.section_id,
                &existing.academic_year,
                Some(existing.id),
            )
            .await?
        {
            return Ok(rejected);
        }

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if let Some(roll_number) = update.roll_number {
            model.roll_number = Set(roll_number);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to update enrollment"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit enrollment"))?;

        Ok(EnrollmentWrite::Saved(updated.into_enrollment()))
    }

    async fn delete_enrollment(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete enrollment"))?;

        Ok(result.rows_affected > 0)
    }

    async fn is_enrolled_in_class(
        &self,
        branch_id: i64,
        student_id: i64,
        class_id: i64,
    ) -> Result<bool> {
        let count = Enrollments::find()
            .inner_join(sections::Entity)
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(sections::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to check enrollment"))?;

        Ok(count > 0)
    }

    async fn active_student_ids_in_section(
        &self,
        branch_id: i64,
        section_id: i64,
    ) -> Result<Vec<i64>> {
        Enrollments::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::SectionId.eq(section_id))
            .filter(Column::Status.eq(active()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load enrolled students"))
    }
}
