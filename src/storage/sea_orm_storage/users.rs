use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListParams},
    },
};
use crate::storage::UserStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
    sea_query::Expr,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "username" => Some(Column::Username),
        "email" => Some(Column::Email),
        "role" => Some(Column::Role),
        "status" => Some(Column::Status),
        "last_login" => Some(Column::LastLogin),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

#[async_trait]
impl UserStorage for SeaOrmStorage {
    async fn create_user(&self, req: CreateUserRequest) -> Result<User> {
        let now = now_ts();

        let model = ActiveModel {
            tenant_id: Set(req.tenant_id),
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create user"))?;

        Ok(result.into_user())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn list_users_with_pagination(
        &self,
        tenant_id: Option<i64>,
        params: UserListParams,
    ) -> Result<PaginatedResponse<User>> {
        let mut select = Users::find();

        if let Some(tenant_id) = tenant_id.or(params.tenant_id) {
            select = select.filter(Column::TenantId.eq(tenant_id));
        }

        if let Some(search) = params.list.search() {
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search)))
                    .add(Column::DisplayName.like(contains_pattern(search))),
            );
        }

        if let Some(ref role) = params.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(ref status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = apply_sort(
            select,
            &params.list,
            sort_column,
            Column::Id,
            Column::CreatedAt,
        );

        paginate(&self.db, select, &params.list, "Failed to list users", |m| {
            m.into_user()
        })
        .await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(display_name) = update.display_name {
            model.display_name = Set(display_name);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update user"))?;

        Ok(Some(updated.into_user()))
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete user"))?;

        Ok(result.rows_affected > 0)
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to update last login"))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_users(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count users"))
    }
}
