use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SectionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn delete_section(
    service: &SectionService,
    request: &HttpRequest,
    section_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_section(scope.branch_id, section_id).await? {
            return Err(not_found(ErrorCode::SectionNotFound, "Section not found"));
        }
        info!("Section {} deleted from branch {}", section_id, scope.branch_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Section deleted successfully",
        )))
    })
    .await
}
