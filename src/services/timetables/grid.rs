use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TimetableService;
use crate::models::timetables::responses::SectionTimetableResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, not_found};

pub async fn section_timetable(
    service: &TimetableService,
    request: &HttpRequest,
    section_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if storage.get_section(scope.branch_id, section_id).await?.is_none() {
            return Err(not_found(ErrorCode::SectionNotFound, "Section not found"));
        }
        let periods = storage
            .list_section_periods(scope.branch_id, section_id)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            SectionTimetableResponse::from_periods(section_id, periods),
            "Section timetable retrieved successfully",
        )))
    })
    .await
}
