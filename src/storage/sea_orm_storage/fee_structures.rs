use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::fee_structures::{ActiveModel, Column, Entity as FeeStructures};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    fee_structures::{
        entities::FeeStructure,
        requests::{CreateFeeStructureRequest, FeeStructureListParams, UpdateFeeStructureRequest},
    },
};
use crate::storage::FeeStructureStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "amount" => Some(Column::Amount),
        "academic_year" => Some(Column::AcademicYear),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

#[async_trait]
impl FeeStructureStorage for SeaOrmStorage {
    async fn create_fee_structure(
        &self,
        branch_id: i64,
        req: CreateFeeStructureRequest,
    ) -> Result<FeeStructure> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            class_id: Set(req.class_id),
            name: Set(req.name),
            amount: Set(req.amount),
            frequency: Set(req.frequency.to_string()),
            academic_year: Set(req.academic_year),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create fee structure"))?;

        Ok(result.into_fee_structure())
    }

    async fn get_fee_structure(&self, branch_id: i64, id: i64) -> Result<Option<FeeStructure>> {
        let result = FeeStructures::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load fee structure"))?;

        Ok(result.map(|m| m.into_fee_structure()))
    }

    async fn list_fee_structures_with_pagination(
        &self,
        branch_id: i64,
        params: FeeStructureListParams,
    ) -> Result<PaginatedResponse<FeeStructure>> {
        let mut select = FeeStructures::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(Column::Name.like(contains_pattern(search)));
        }
        if let Some(class_id) = params.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(ref academic_year) = params.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(
            &self.db,
            select,
            &params.list,
            "Failed to list fee structures",
            |m| m.into_fee_structure(),
        )
        .await
    }

    async fn update_fee_structure(
        &self,
        branch_id: i64,
        id: i64,
        update: UpdateFeeStructureRequest,
    ) -> Result<Option<FeeStructure>> {
        let Some(existing) = FeeStructures::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load fee structure"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());

        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(amount) = update.amount {
            model.amount = Set(amount);
        }
        if let Some(frequency) = update.frequency {
            model.frequency = Set(frequency.to_string());
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update fee structure"))?;

        Ok(Some(updated.into_fee_structure()))
    }

    async fn delete_fee_structure(&self, branch_id: i64, id: i64) -> Result<bool> {
        let result = FeeStructures::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete fee structure"))?;

        Ok(result.rows_affected > 0)
    }
}
