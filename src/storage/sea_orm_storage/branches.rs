use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::branches::{ActiveModel, Column, Entity as Branches, Model};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    branches::{
        entities::Branch,
        requests::{BranchListParams, CreateBranchRequest, UpdateBranchRequest},
    },
};
use crate::storage::BranchStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "code" => Some(Column::Code),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

impl SeaOrmStorage {
    async fn find_tenant_branch(&self, tenant_id: i64, id: i64) -> Result<Option<Model>> {
        Branches::find_by_id(id)
            .filter(Column::TenantId.eq(tenant_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load branch"))
    }
}

#[async_trait]
impl BranchStorage for SeaOrmStorage {
    async fn create_branch(&self, tenant_id: i64, req: CreateBranchRequest) -> Result<Branch> {
        let now = now_ts();
        let model = ActiveModel {
            tenant_id: Set(tenant_id),
            name: Set(req.name),
            code: Set(req.code),
            address: Set(req.address),
            phone: Set(req.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create branch"))?;

        Ok(result.into_branch())
    }

    async fn get_branch_by_id(&self, id: i64) -> Result<Option<Branch>> {
        let result = Branches::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load branch"))?;

        Ok(result.map(|m| m.into_branch()))
    }

    async fn get_branch(&self, tenant_id: i64, id: i64) -> Result<Option<Branch>> {
        Ok(self
            .find_tenant_branch(tenant_id, id)
            .await?
            .map(|m| m.into_branch()))
    }

    async fn list_branches_with_pagination(
        &self,
        tenant_id: i64,
        params: BranchListParams,
    ) -> Result<PaginatedResponse<Branch>> {
        let mut select = Branches::find().filter(Column::TenantId.eq(tenant_id));

        if let Some(search) = params.list.search() {
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(contains_pattern(search)))
                    .add(Column::Code.like(contains_pattern(search))),
            );
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list branches", |m| {
            m.into_branch()
        })
        .await
    }

    async fn update_branch(
        &self,
        tenant_id: i64,
        id: i64,
        update: UpdateBranchRequest,
    ) -> Result<Option<Branch>> {
        let Some(existing) = self.find_tenant_branch(tenant_id, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(address) = update.address {
            model.address = Set(address);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update branch"))?;

        Ok(Some(updated.into_branch()))
    }

    async fn delete_branch(&self, tenant_id: i64, id: i64) -> Result<bool> {
        let result = Branches::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::TenantId.eq(tenant_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete branch"))?;

        Ok(result.rows_affected > 0)
    }
}
