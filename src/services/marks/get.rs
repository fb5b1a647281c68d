use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarkService, mark_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_mark(
    service: &MarkService,
    request: &HttpRequest,
    mark_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_mark(scope.branch_id, mark_id).await? {
            Some(mark) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                mark,
                "Mark retrieved successfully",
            ))),
            None => Err(mark_not_found()),
        }
    })
    .await
}
