use super::{SeaOrmStorage, apply_sort, db_error, now_ts, paginate};
use crate::entity::invoices;
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse,
    invoices::entities::{Invoice, InvoiceStatus, round_money},
    payments::{
        entities::Payment,
        requests::{CreatePaymentRequest, PaymentListParams},
        responses::PaymentReceiptResponse,
    },
};
use crate::storage::{PaymentOutcome, PaymentStorage};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait, sea_query::Query,
};

fn sort_column(field: &str) -> Option<Column> {
    match field {
        "id" => Some(Column::Id),
        "invoice_id" => Some(Column::InvoiceId),
        "amount" => Some(Column::Amount),
        "paid_at" => Some(Column::PaidAt),
        "created_at" => Some(Column::CreatedAt),
        _ => None,
    }
}

// 允许的舍入误差
const CENT_TOLERANCE: f64 = 0.005;

#[async_trait]
impl PaymentStorage for SeaOrmStorage {
    async fn record_payment(
        &self,
        branch_id: i64,
        recorded_by: Option<i64>,
        req: CreatePaymentRequest,
    ) -> Result<PaymentOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let Some(invoice) = invoices::Entity::find_by_id(req.invoice_id)
            .filter(invoices::Column::BranchId.eq(branch_id))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error("Failed to load invoice"))?
        else {
            return Ok(PaymentOutcome::InvoiceNotFound);
        };

        let status = invoice
            .status
            .parse::<InvoiceStatus>()
            .unwrap_or(InvoiceStatus::Issued);
        if !status.accepts_payment() {
            return Ok(PaymentOutcome::InvoiceNotPayable);
        }

        let outstanding = round_money(invoice.total_amount - invoice.paid_amount);
        if req.amount > outstanding + CENT_TOLERANCE {
            return Ok(PaymentOutcome::ExceedsBalance { outstanding });
        }

        let now = now_ts();
        let payment = ActiveModel {
            branch_id: Set(branch_id),
            invoice_id: Set(invoice.id),
            amount: Set(round_money(req.amount)),
            method: Set(req.method.to_string()),
            reference: Set(req.reference),
            paid_at: Set(req.paid_at.map(|t| t.timestamp()).unwrap_or(now)),
            recorded_by: Set(recorded_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to record payment"))?;

        let paid = round_money(invoice.paid_amount + payment.amount);
        let total = invoice.total_amount;
        let mut model: invoices::ActiveModel = invoice.into();
        model.paid_amount = Set(paid);
        model.status = Set(InvoiceStatus::from_amounts(total, paid).to_string());
        model.updated_at = Set(now);
        let invoice = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to update invoice"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit payment"))?;

        Ok(PaymentOutcome::Recorded(PaymentReceiptResponse {
            payment: payment.into_payment(),
            invoice: invoice.into_invoice(),
        }))
    }

    async fn get_payment(&self, branch_id: i64, id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load payment"))?;

        Ok(result.map(|m| m.into_payment()))
    }

    async fn list_payments_with_pagination(
        &self,
        branch_id: i64,
        params: PaymentListParams,
    ) -> Result<PaginatedResponse<Payment>> {
        let mut select = Payments::find().filter(Column::BranchId.eq(branch_id));

        if let Some(invoice_id) = params.invoice_id {
            select = select.filter(Column::InvoiceId.eq(invoice_id));
        }
        if let Some(student_id) = params.student_id {
            let student_invoices = Query::select()
                .column(invoices::Column::Id)
                .from(invoices::Entity)
                .and_where(invoices::Column::BranchId.eq(branch_id))
                .and_where(invoices::Column::StudentId.eq(student_id))
                .to_owned();
            select = select.filter(Column::InvoiceId.in_subquery(student_invoices));
        }

        let select = apply_sort(select, &params.list, sort_column, Column::Id, Column::CreatedAt);
        paginate(&self.db, select, &params.list, "Failed to list payments", |m| {
            m.into_payment()
        })
        .await
    }

    async fn delete_payment(&self, branch_id: i64, id: i64) -> Result<Option<Invoice>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let Some((payment, Some(invoice))) = Payments::find_by_id(id)
            .filter(Column::BranchId.eq(branch_id))
            .find_also_related(invoices::Entity)
            .one(&txn)
            .await
            .map_err(db_error("Failed to load payment"))?
        else {
            return Ok(None);
        };

        Payments::delete_by_id(payment.id)
            .exec(&txn)
            .await
            .map_err(db_error("Failed to delete payment"))?;

        let paid = round_money((invoice.paid_amount - payment.amount).max(0.0));
        let total = invoice.total_amount;
        let cancelled = invoice.status == InvoiceStatus::Cancelled.to_string();
        let mut model: invoices::ActiveModel = invoice.into();
        model.paid_amount = Set(paid);
        if !cancelled {
            model.status = Set(InvoiceStatus::from_amounts(total, paid).to_string());
        }
        model.updated_at = Set(now_ts());
        let invoice = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to update invoice"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit payment removal"))?;

        Ok(Some(invoice.into_invoice()))
    }
}
