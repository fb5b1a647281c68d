use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::StudentService;
use crate::models::attendance::requests::AttendanceSummaryQuery;
use crate::models::attendance::responses::AttendanceSummaryResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, invalid, not_found, today};
use crate::storage::Storage;
use crate::utils::validate::{optional_text, parse_date};

// 学生须属于当前校区
async fn ensure_student(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    student_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_student(branch_id, student_id).await? {
        Some(_) => Ok(()),
        None => Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
    }
}

pub async fn attendance_summary(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    query: AttendanceSummaryQuery,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        ensure_student(&storage, scope.branch_id, student_id).await?;

        let date_from = optional_text(query.date_from)
            .map(|d| parse_date(&d).map(|d| d.to_string()))
            .transpose()
            .map_err(invalid)?;
        let date_to = optional_text(query.date_to)
            .map(|d| parse_date(&d).map(|d| d.to_string()))
            .transpose()
            .map_err(invalid)?;
        if let (Some(from), Some(to)) = (&date_from, &date_to)
            && from > to
        {
            return Err(invalid("date_from must not be after date_to"));
        }

        let counts = storage
            .student_attendance_counts(
                scope.branch_id,
                student_id,
                date_from.as_deref(),
                date_to.as_deref(),
            )
            .await?;
        let summary = AttendanceSummaryResponse {
            student_id,
            date_from,
            date_to,
            attendance_rate: counts.attendance_rate(),
            counts,
        };
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Attendance summary retrieved successfully",
        )))
    })
    .await
}

pub async fn fee_balance(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        ensure_student(&storage, scope.branch_id, student_id).await?;

        let balance = storage
            .student_fee_balance(scope.branch_id, student_id, &today())
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            balance,
            "Fee balance retrieved successfully",
        )))
    })
    .await
}
