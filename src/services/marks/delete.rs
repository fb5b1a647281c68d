use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarkService, mark_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn delete_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_mark(scope.branch_id, mark_id).await? {
            return Err(mark_not_found());
        }
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Mark deleted successfully")))
    })
    .await
}
