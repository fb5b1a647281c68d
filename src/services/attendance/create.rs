use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{AttendanceService, check_records, detail, enrolled_students};
use crate::models::attendance::requests::CreateAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::references::require_section;
use crate::services::{branch_scope, conflict, current_user, finish, invalid};
use crate::utils::validate::parse_date;

/// 日期合法且不晚于今天
pub(crate) fn check_attendance_date(value: &str) -> Result<String, String> {
    let date = parse_date(value)?;
    if date > Utc::now().date_naive() {
        return Err("attendance date cannot be in the future".to_string());
    }
    Ok(date.to_string())
}

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_data: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let user = current_user(request)?;
        let storage = service.get_storage(request)?;

        let date = check_attendance_date(&attendance_data.date).map_err(invalid)?;
        let section = require_section(&storage, scope.branch_id, attendance_data.section_id).await?;
        let enrolled = enrolled_students(&storage, scope.branch_id, section.id).await?;
        let records = check_records(attendance_data.records, &enrolled).map_err(invalid)?;

        if storage
            .find_attendance_session(scope.branch_id, section.id, &date)
            .await?
            .is_some()
        {
            return Err(conflict(
                ErrorCode::AttendanceAlreadyTaken,
                format!("Attendance for section {} on {date} was already taken", section.id),
            ));
        }

        let (session, records) = storage
            .create_attendance(
                scope.branch_id,
                Some(user.id),
                CreateAttendanceRequest {
                    section_id: section.id,
                    date,
                    records,
                },
            )
            .await?;
        info!(
            "Attendance session {} for section {} on {} ({} records) taken by user {}",
            session.id,
            session.section_id,
            session.date,
            records.len(),
            user.id
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            detail(session, records),
            "Attendance recorded successfully",
        )))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_attendance_date() {
        let today = Utc::now().date_naive();
        assert_eq!(
            check_attendance_date(&today.to_string()),
            Ok(today.to_string())
        );
        assert!(check_attendance_date(&(today - Duration::days(3)).to_string()).is_ok());
        assert!(check_attendance_date(&(today + Duration::days(1)).to_string()).is_err());
        assert!(check_attendance_date("yesterday").is_err());
    }
}
