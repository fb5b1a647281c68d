use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn get_section(
    service: &SectionService,
    request: &HttpRequest,
    section_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_section(scope.branch_id, section_id).await? {
            Some(section) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                section,
                "Section retrieved successfully",
            ))),
            None => Err(not_found(ErrorCode::SectionNotFound, "Section not found")),
        }
    })
    .await
}
