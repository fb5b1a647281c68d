use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AttendanceService, attendance_not_found, check_records, detail, enrolled_students};
use crate::models::ApiResponse;
use crate::models::attendance::requests::UpdateAttendanceRequest;
use crate::services::{branch_scope, current_user, finish, invalid};

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    session_id: i64,
    update_data: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let user = current_user(request)?;
        let storage = service.get_storage(request)?;

        let (session, _) = storage
            .get_attendance(scope.branch_id, session_id)
            .await?
            .ok_or_else(attendance_not_found)?;
        let enrolled = enrolled_students(&storage, scope.branch_id, session.section_id).await?;
        let records = check_records(update_data.records, &enrolled).map_err(invalid)?;

        match storage
            .replace_attendance_records(scope.branch_id, session_id, Some(user.id), records)
            .await?
        {
            Some((session, records)) => {
                info!(
                    "Attendance session {} replaced with {} records by user {}",
                    session.id,
                    records.len(),
                    user.id
                );
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    detail(session, records),
                    "Attendance updated successfully",
                )))
            }
            None => Err(attendance_not_found()),
        }
    })
    .await
}
