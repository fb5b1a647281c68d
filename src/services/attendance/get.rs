use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, attendance_not_found, detail};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_attendance(scope.branch_id, session_id).await? {
            Some((session, records)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail(session, records),
                "Attendance retrieved successfully",
            ))),
            None => Err(attendance_not_found()),
        }
    })
    .await
}
