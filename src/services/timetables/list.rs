use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TimetableService;
use crate::models::timetables::requests::TimetableListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_periods(
    service: &TimetableService,
    request: &HttpRequest,
    query: TimetableListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_periods_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Timetable retrieved successfully"))
    })
    .await
}
