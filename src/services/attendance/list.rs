use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::AttendanceListParams;
use crate::services::{branch_scope, finish, invalid, list_response};
use crate::utils::validate::parse_date;

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        for date in [&query.date_from, &query.date_to].into_iter().flatten() {
            parse_date(date).map_err(invalid)?;
        }

        let page = storage
            .list_attendance_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Attendance list retrieved successfully"))
    })
    .await
}
