use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ApiResponse;
use crate::services::{branch_scope, finish, today};
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    /// 当前校区概览
    pub async fn overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(async {
            let scope = branch_scope(request)?;
            let storage = self.get_storage(request)?;

            let stats = storage.dashboard_stats(scope.branch_id, &today()).await?;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                stats,
                "Dashboard retrieved successfully",
            )))
        })
        .await
    }
}
