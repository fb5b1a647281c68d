use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers, Model};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    teachers::{
        entities::{Teacher, TeacherStatus},
        requests::{CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest},
    },
};
use crate::storage::TeacherStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "employee_no" => Some(Column::EmployeeNo),
        "first_name" => Some(Column::FirstName),
        "last_name" => Some(Column::LastName),
        "status" => Some(Column::Status),
        "hire_date" => Some(Column::HireDate),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

impl SeaOrmStorage {
    async fn find_branch_teacher(&self, branch_id: i64, id: i64) -> Result<Option<Model>> {
        Teachers::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load teacher"))
    }
}

#[async_trait]
impl TeacherStorage for SeaOrmStorage {
    async fn create_teacher(&self, branch_id: i64, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            employee_no: Set(req.employee_no),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            phone: Set(req.phone),
            specialization: Set(req.specialization),
            hire_date: Set(req.hire_date),
            status: Set(req.status.unwrap_or(TeacherStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create teacher"))?;

        Ok(result.into_teacher())
    }

    async fn get_teacher(&self, branch_id: i64, id: i64) -> Result<Option<Teacher>> {
        Ok(self
            .find_branch_teacher(branch_id, id)
            .await?
            .map(|m| m.into_teacher()))
    }

    async fn list_teachers_with_pagination(
        &self,
        branch_id: i64,
        params: TeacherListParams,
    ) -> Result<PaginatedResponse<Teacher>> {
        let mut select = Teachers::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.like(contains_pattern(search)))
                    .add(Column::LastName.like(contains_pattern(search)))
                    .add(Column::EmployeeNo.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search))),
            );
        }
        if let Some(ref status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list teachers", |m| {
            m.into_teacher()
        })
        .await
    }

    async fn update_teacher(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let Some(existing) = self.find_branch_teacher(branch_id, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());

        if let Some(employee_no) = update.employee_no {
            model.employee_no = Set(employee_no);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(specialization) = update.specialization {
            model.specialization = Set(specialization);
        }
        if let Some(hire_date) = update.hire_date {
            model.hire_date = Set(hire_date);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update teacher"))?;

        Ok(Some(updated.into_teacher()))
    }

    async fn delete_teacher(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = Teachers::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete teacher"))?;

        Ok(result.rows_affected > 0)
    }
}
