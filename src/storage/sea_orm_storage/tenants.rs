use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::tenants::{ActiveModel, Column, Entity as Tenants};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    tenants::{
        entities::{Tenant, TenantStatus},
        requests::{CreateTenantRequest, TenantListParams, UpdateTenantRequest},
    },
};
use crate::storage::TenantStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "code" => Some(Column::Code),
        "status" => Some(Column::Status),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

#[async_trait]
impl TenantStorage for SeaOrmStorage {
    async fn create_tenant(&self, req: CreateTenantRequest) -> Result<Tenant> {
        let now = now_ts();
        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            status: Set(req.status.unwrap_or(TenantStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create tenant"))?;

        Ok(result.into_tenant())
    }

    async fn get_tenant_by_id(&self, id: i64) -> Result<Option<Tenant>> {
        let result = Tenants::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load tenant"))?;

        Ok(result.map(|m| m.into_tenant()))
    }

    async fn list_tenants_with_pagination(
        &self,
        params: TenantListParams,
    ) -> Result<PaginatedResponse<Tenant>> {
        let mut select = Tenants::find();

        if let Some(search) = params.list.search() {
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(contains_pattern(search)))
                    .add(Column::Code.like(contains_pattern(search))),
            );
        }
        if let Some(ref status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list tenants", |m| {
            m.into_tenant()
        })
        .await
    }

    async fn update_tenant(&self, id: i64, update: UpdateTenantRequest) -> Result<Option<Tenant>> {
        let Some(existing) = Tenants::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load tenant"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update tenant"))?;

        Ok(Some(updated.into_tenant()))
    }

    async fn delete_tenant(&self, id: i64) -> Result<bool> {
        let result = Tenants::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete tenant"))?;

        Ok(result.rows_affected > 0)
    }
}
