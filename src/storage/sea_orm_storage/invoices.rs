use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::invoices::{ActiveModel, Column, Entity as Invoices, Model};
use crate::entity::payments;
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse,
    invoices::{
        entities::{Invoice, InvoiceItem, InvoiceStatus, items_total},
        requests::InvoiceListParams,
    },
};
use crate::storage::{InvoiceStorage, InvoiceWrite, NewInvoice};
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "invoice_no" => Some(Column::InvoiceNo),
        "issue_date" => Some(Column::IssueDate),
        "due_date" => Some(Column::DueDate),
        "total_amount" => Some(Column::TotalAmount),
        "status" => Some(Column::Status),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

fn encode_items(items: &[InvoiceItem]) -> Result<String> {
    serde_json::to_string(items)
        .map_err(|e| SchoolError::serialization(format!("Failed to encode invoice items: {e}")))
}

async fn find_branch_invoice<C: ConnectionTrait>(
    db: &C,
    branch_id: i64,
    id: i64,
) -> Result<Option<Model>> {
    Invoices::find_by_id(id)
        .filter(Column::BranchId.eq(branch_id))
        .one(db)
        .await
        .map_err(db_error("Failed to load invoice"))
}

/// 事务内加行锁读取账单，与缴费登记互斥
async fn lock_branch_invoice(
    txn: &DatabaseTransaction,
    branch_id: i64,
    id: i64,
) -> Result<Option<Model>> {
    Invoices::find_by_id(id)
        .filter(Column::BranchId.eq(branch_id))
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(db_error("Failed to load invoice"))
}

/// 已有缴费的账单不可修改、取消或删除
async fn invoice_has_payments<C: ConnectionTrait>(db: &C, invoice: &Model) -> Result<bool> {
    if invoice.paid_amount > 0.0 {
        return Ok(true);
    }
    let count = payments::Entity::find()
        .filter(payments::Column::InvoiceId.eq(invoice.id))
        .count(db)
        .await
        .map_err(db_error("Failed to count payments"))?;
    Ok(count > 0)
}

impl SeaOrmStorage {
    async fn begin_invoice_txn(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))
    }
}

#[async_trait]
impl InvoiceStorage for SeaOrmStorage {
    async fn create_invoice(&self, branch_id: i64, new: NewInvoice) -> Result<Invoice> {
        let now = now_ts();
        let model = ActiveModel {
            branch_id: Set(branch_id),
            student_id: Set(new.student_id),
            invoice_no: Set(new.invoice_no),
            issue_date: Set(new.issue_date),
            due_date: Set(new.due_date),
            items: Set(encode_items(&new.items)?),
            total_amount: Set(new.total_amount),
            paid_amount: Set(0.0),
            status: Set(InvoiceStatus::Issued.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create invoice"))?;

        Ok(result.into_invoice())
    }

    async fn get_invoice(&self, branch_id: i64, id: i64) -> Result<Option<Invoice>> {
        Ok(find_branch_invoice(&self.db, branch_id, id)
            .await?
            .map(|m| m.into_invoice()))
    }

    async fn list_invoices_with_pagination(
        &self,
        branch_id: i64,
        params: InvoiceListParams,
        today: &str,
    ) -> Result<PaginatedResponse<Invoice>> {
        let mut select = Invoices::find().filter(Column::BranchId.eq(branch_id));

        if let Some(search) = params.list.search() {
            select = select.filter(Column::InvoiceNo.like(contains_pattern(search)));
        }
        if let Some(student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if params.overdue == Some(true) {
            select = select.filter(Column::DueDate.lt(today)).filter(
                Column::Status.is_in([
                    InvoiceStatus::Issued.to_string(),
                    InvoiceStatus::PartiallyPaid.to_string(),
                ]),
            );
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list invoices", |m| {
            m.into_invoice()
        })
        .await
    }

    async fn update_invoice(
        &self,
        branch_id: i64,
        id: i64,
        due_date: Option<String>,
        items: Option<Vec<InvoiceItem>>,
    ) -> Result<InvoiceWrite<Invoice>> {
        let txn = self.begin_invoice_txn().await?;
        let Some(existing) = lock_branch_invoice(&txn, branch_id, id).await? else {
            return Ok(InvoiceWrite::NotFound);
        };
        if existing.status == InvoiceStatus::Cancelled.to_string()
            || invoice_has_payments(&txn, &existing).await?
        {
            return Ok(InvoiceWrite::Locked);
        }

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(now_ts());

        if let Some(due_date) = due_date {
            model.due_date = Set(due_date);
        }
        if let Some(items) = items {
            model.total_amount = Set(items_total(&items));
            model.items = Set(encode_items(&items)?);
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to update invoice"))?;
        txn.commit()
            .await
            .map_err(db_error("Failed to commit invoice update"))?;

        Ok(InvoiceWrite::Done(updated.into_invoice()))
    }

    async fn cancel_invoice(&self, branch_id: i64, id: i64) -> Result<InvoiceWrite<Invoice>> {
        let txn = self.begin_invoice_txn().await?;
        let Some(existing) = lock_branch_invoice(&txn, branch_id, id).await? else {
            return Ok(InvoiceWrite::NotFound);
        };
        if existing.status == InvoiceStatus::Cancelled.to_string() {
            return Ok(InvoiceWrite::Done(existing.into_invoice()));
        }
        if invoice_has_payments(&txn, &existing).await? {
            return Ok(InvoiceWrite::Locked);
        }

        let mut model: ActiveModel = existing.into();
        model.status = Set(InvoiceStatus::Cancelled.to_string());
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to cancel invoice"))?;
        txn.commit()
            .await
            .map_err(db_error("Failed to commit invoice cancel"))?;

        Ok(InvoiceWrite::Done(updated.into_invoice()))
    }

    async fn delete_invoice(&self, branch_id: i64, id: i64) -> Result<InvoiceWrite<()>> {
        let txn = self.begin_invoice_txn().await?;
        let Some(existing) = lock_branch_invoice(&txn, branch_id, id).await? else {
            return Ok(InvoiceWrite::NotFound);
        };
        if invoice_has_payments(&txn, &existing).await? {
            return Ok(InvoiceWrite::Locked);
        }

        Invoices::delete_many()
            .filter(Column::Id.eq(existing.id))
            .filter(Column::BranchId.eq(branch_id))
            .exec(&txn)
            .await
            .map_err(db_error("Failed to delete invoice"))?;
        txn.commit()
            .await
            .map_err(db_error("Failed to commit invoice delete"))?;

        Ok(InvoiceWrite::Done(()))
    }
}
