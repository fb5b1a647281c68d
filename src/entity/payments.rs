//! 缴费记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub branch_id: i64,
    pub invoice_id: i64,
    pub amount: f64,
    pub method: String,
    pub reference: Option<String>,
    pub paid_at: i64,
    pub recorded_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoice,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment(self) -> crate::models::payments::entities::Payment {
        use crate::models::payments::entities::{Payment, PaymentMethod};

        Payment {
            id: self.id,
            branch_id: self.branch_id,
            invoice_id: self.invoice_id,
            amount: self.amount,
            method: self
                .method
                .parse::<PaymentMethod>()
                .unwrap_or(PaymentMethod::Cash),
            reference: self.reference,
            paid_at: super::timestamp(self.paid_at),
            recorded_by: self.recorded_by,
            created_at: super::timestamp(self.created_at),
        }
    }
}
