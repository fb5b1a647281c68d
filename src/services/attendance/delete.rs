use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, attendance_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_attendance(scope.branch_id, session_id).await? {
            return Err(attendance_not_found());
        }
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Attendance deleted successfully",
        )))
    })
    .await
}
