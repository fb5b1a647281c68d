//! 账单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub branch_id: i64,
    pub student_id: i64,
    pub invoice_no: String,
    pub issue_date: String,
    pub due_date: String,
    /// 明细 JSON 文本
    #[sea_orm(column_type = "Text")]
    pub items: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_invoice(self) -> crate::models::invoices::entities::Invoice {
        use crate::models::invoices::entities::{Invoice, InvoiceItem, InvoiceStatus, round_money};

        let items: Vec<InvoiceItem> = serde_json::from_str(&self.items).unwrap_or_default();

        Invoice {
            id: self.id,
            branch_id: self.branch_id,
            student_id: self.student_id,
            invoice_no: self.invoice_no,
            issue_date: self.issue_date,
            due_date: self.due_date,
            items,
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            balance: round_money(self.total_amount - self.paid_amount),
            status: self
                .status
                .parse::<InvoiceStatus>()
                .unwrap_or(InvoiceStatus::Issued),
            created_at: super::timestamp(self.created_at),
            updated_at: super::timestamp(self.updated_at),
        }
    }
}
