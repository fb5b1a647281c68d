pub mod cancel;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::invoices::entities::InvoiceItem;
use crate::models::invoices::requests::{
    CreateInvoiceRequest, InvoiceListParams, UpdateInvoiceRequest,
};
use crate::services::fee_structures::check_amount;
use crate::services::{bad_reference, conflict, not_found};
use crate::storage::Storage;
use crate::utils::validate::require_text;

pub struct InvoiceService {
    storage: Option<Arc<dyn Storage>>,
}

impl InvoiceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_invoices(
        &self,
        request: &HttpRequest,
        query: InvoiceListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_invoices(self, request, query).await
    }

    pub async fn create_invoice(
        &self,
        request: &HttpRequest,
        invoice_data: CreateInvoiceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_invoice(self, request, invoice_data).await
    }

    pub async fn get_invoice(
        &self,
        request: &HttpRequest,
        invoice_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_invoice(self, request, invoice_id).await
    }

    pub async fn update_invoice(
        &self,
        request: &HttpRequest,
        invoice_id: i64,
        update_data: UpdateInvoiceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_invoice(self, request, invoice_id, update_data).await
    }

    pub async fn cancel_invoice(
        &self,
        request: &HttpRequest,
        invoice_id: i64,
    ) -> ActixResult<HttpResponse> {
        cancel::cancel_invoice(self, request, invoice_id).await
    }

    pub async fn delete_invoice(
        &self,
        request: &HttpRequest,
        invoice_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_invoice(self, request, invoice_id).await
    }
}

pub(crate) fn invoice_not_found() -> HttpResponse {
    not_found(ErrorCode::InvoiceNotFound, "Invoice not found")
}

pub(crate) fn invoice_locked(message: &str) -> HttpResponse {
    conflict(ErrorCode::InvoiceLocked, message)
}

/// 至少一项，描述非空，金额为正
pub(crate) fn normalize_items(items: Vec<InvoiceItem>) -> Result<Vec<InvoiceItem>, String> {
    if items.is_empty() {
        return Err("items must contain at least one entry".to_string());
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Ok(InvoiceItem {
                description: require_text("description", &item.description, 128)
                    .map_err(|e| format!("items[{index}]: {e}"))?,
                amount: check_amount(item.amount).map_err(|e| format!("items[{index}]: {e}"))?,
                fee_structure_id: item.fee_structure_id,
            })
        })
        .collect()
}

/// 明细中引用的收费标准须属于当前校区
pub(crate) async fn check_fee_structures(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    items: &[InvoiceItem],
) -> Result<(), HttpResponse> {
    for fee_id in items.iter().filter_map(|item| item.fee_structure_id) {
        if storage.get_fee_structure(branch_id, fee_id).await?.is_none() {
            return Err(bad_reference(
                ErrorCode::FeeStructureNotFound,
                format!("Fee structure {fee_id} does not exist in this branch"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str, amount: f64) -> InvoiceItem {
        InvoiceItem {
            description: description.to_string(),
            amount,
            fee_structure_id: None,
        }
    }

    #[test]
    fn test_normalize_items() {
        let items = normalize_items(vec![item(" Tuition ", 1200.0), item("Bus", 80.255)]).unwrap();
        assert_eq!(items[0].description, "Tuition");
        assert_eq!(items[1].amount, 80.26);

        assert!(normalize_items(vec![]).is_err());
        let err = normalize_items(vec![item("Tuition", 10.0), item("Refund", -5.0)]).unwrap_err();
        assert!(err.starts_with("items[1]"));
        assert!(normalize_items(vec![item("  ", 10.0)]).is_err());
    }
}
