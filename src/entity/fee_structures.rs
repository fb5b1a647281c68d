//! 收费标准实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_structures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub branch_id: i64,
    pub class_id: Option<i64>,
    pub name: String,
    pub amount: f64,
    pub frequency: String,
    pub academic_year: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_structure(self) -> crate::models::fee_structures::entities::FeeStructure {
        use crate::models::fee_structures::entities::{FeeFrequency, FeeStructure};

        FeeStructure {
            id: self.id,
            branch_id: self.branch_id,
            class_id: self.class_id,
            name: self.name,
            amount: self.amount,
            frequency: self
                .frequency
                .parse::<FeeFrequency>()
                .unwrap_or(FeeFrequency::OneTime),
            academic_year: self.academic_year,
            created_at: super::timestamp(self.created_at),
            updated_at: super::timestamp(self.updated_at),
        }
    }
}
