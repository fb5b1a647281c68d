use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model};
use crate::entity::{attendance_records, attendance_sessions, enrollments, invoices};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    attendance::entities::{AttendanceCounts, AttendanceStatus},
    enrollments::entities::EnrollmentStatus,
    invoices::{
        entities::{InvoiceStatus, round_money},
        responses::FeeBalanceResponse,
    },
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListParams, UpdateStudentRequest},
    },
};
use crate::storage::StudentStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, Select, Set,
    sea_query::Query,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "admission_no" => Some(Column::AdmissionNo),
        "first_name" => Some(Column::FirstName),
        "last_name" => Some(Column::LastName),
        "status" => Some(Column::Status),
        "date_of_birth" => Some(Column::DateOfBirth),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

/// 列表与导出共用的过滤条件
fn filtered(branch_id: i64, params: &StudentListParams) -> Select<Students> {
    let mut select = Students::find().filter(Column::BranchId.eq(branch_id));

    if let Some(search) = params.list.search() {
        select = select.filter(
            Condition::any()
                .add(Column::FirstName.like(contains_pattern(search)))
                .add(Column::LastName.like(contains_pattern(search)))
                .add(Column::AdmissionNo.like(contains_pattern(search))),
        );
    }
    if let Some(ref status) = params.status {
        select = select.filter(Column::Status.eq(status.to_string()));
    }
    // 在该分组中有有效注册的学生
    if let Some(section_id) = params.section_id {
        let enrolled = Query::select()
            .column(enrollments::Column::StudentId)
            .from(enrollments::Entity)
            .and_where(enrollments::Column::BranchId.eq(branch_id))
            .and_where(enrollments::Column::SectionId.eq(section_id))
            .and_where(enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .to_owned();
        select = select.filter(Column::Id.in_subquery(enrolled));
    }

    apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt)
}

impl SeaOrmStorage {
    pub(crate) async fn find_branch_student(&self, branch_id: i64, id: i64) -> Result<Option<Model>> {
        Students::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load student"))
    }
}

#[async_trait]
impl StudentStorage for SeaOrmStorage {
    async fn create_student(&self, branch_id: i64, req: CreateStudentRequest) -> Result<Student> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            admission_no: Set(req.admission_no),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            gender: Set(req.gender.map(|g| g.to_string())),
            date_of_birth: Set(req.date_of_birth),
            guardian_name: Set(req.guardian_name),
            guardian_phone: Set(req.guardian_phone),
            guardian_email: Set(req.guardian_email),
            status: Set(req.status.unwrap_or(StudentStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create student"))?;

        Ok(result.into_student())
    }

    async fn get_student(&self, branch_id: i64, id: i64) -> Result<Option<Student>> {
        Ok(self
            .find_branch_student(branch_id, id)
            .await?
            .map(|m| m.into_student()))
    }

    async fn list_students_with_pagination(
        &self,
        branch_id: i64,
        params: StudentListParams,
    ) -> Result<PaginatedResponse<Student>> {
        let select = filtered(branch_id, &params);
        paginate(&self.db, select, &params.list, "Failed to list students", |m| {
            m.into_student()
        })
        .await
    }

    async fn list_all_students(
        &self,
        branch_id: i64,
        params: StudentListParams,
    ) -> Result<Vec<Student>> {
        let models = filtered(branch_id, &params)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to export students"))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    async fn update_student(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = self.find_branch_student(branch_id, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());

        if let Some(admission_no) = update.admission_no {
            model.admission_no = Set(admission_no);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender.map(|g| g.to_string()));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(date_of_birth);
        }
        if let Some(guardian_name) = update.guardian_name {
            model.guardian_name = Set(guardian_name);
        }
        if let Some(guardian_phone) = update.guardian_phone {
            model.guardian_phone = Set(guardian_phone);
        }
        if let Some(guardian_email) = update.guardian_email {
            model.guardian_email = Set(guardian_email);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update student"))?;

        Ok(Some(updated.into_student()))
    }

    async fn delete_student(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Students::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete student"))?;

        Ok(result.rows_affected > 0)
    }

    async fn student_attendance_counts(
        &self,
        branch_id: i64,
        student_id: i64,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<AttendanceCounts> {
        let mut select = attendance_records::Entity::find()
            .inner_join(attendance_sessions::Entity)
            .filter(attendance_sessions::Column::BranchId.eq(branch_id))
            .filter(attendance_records::Column::StudentId.eq(student_id));

        if let Some(from) = date_from {
            select = select.filter(attendance_sessions::Column::Date.gte(from));
        }
        if let Some(to) = date_to {
            select = select.filter(attendance_sessions::Column::Date.lte(to));
        }

        let statuses: Vec<String> = select
            .select_only()
            .column(attendance_records::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load attendance"))?;

        Ok(statuses
            .iter()
            .filter_map(|s| s.parse::<AttendanceStatus>().ok())
            .collect())
    }

    async fn student_fee_balance(
        &self,
        branch_id: i64,
        student_id: i64,
        today: &str,
    ) -> Result<FeeBalanceResponse> {
        let invoices = invoices::Entity::find()
            .filter(invoices::Column::BranchId.eq(branch_id))
            .filter(invoices::Column::StudentId.eq(student_id))
            .filter(invoices::Column::Status.ne(InvoiceStatus::Cancelled.to_string()))
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load invoices"))?;

        let mut balance = FeeBalanceResponse {
            student_id,
            ..Default::default()
        };
        for invoice in &invoices {
            let outstanding = invoice.total_amount - invoice.paid_amount;
            balance.invoice_count += 1;
            balance.invoiced += invoice.total_amount;
            balance.paid += invoice.paid_amount;
            if outstanding > 0.005 && invoice.due_date.as_str() < today {
                balance.overdue_count += 1;
            }
        }
        balance.invoiced = round_money(balance.invoiced);
        balance.paid = round_money(balance.paid);
        balance.outstanding = round_money(balance.invoiced - balance.paid);

        Ok(balance)
    }
}
