use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TimetableService, check_slot, ensure_no_conflicts, format_time, period_not_found};
use crate::models::ApiResponse;
use crate::models::timetables::requests::UpdateTimetablePeriodRequest;
use crate::services::references::{
    require_active_teacher, require_applicable, require_class, require_section, require_subject,
};
use crate::services::{branch_scope, finish, invalid};
use crate::utils::timetable::PeriodSlot;
use crate::utils::validate::optional_text;

pub async fn update_period(
    service: &TimetableService,
    request: &HttpRequest,
    period_id: i64,
    update_data: UpdateTimetablePeriodRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let existing = storage
            .get_period(scope.branch_id, period_id)
            .await?
            .ok_or_else(period_not_found)?;

        // 合并后整体校验
        let day_of_week = update_data.day_of_week.unwrap_or(existing.day_of_week);
        let (start, end) = check_slot(
            day_of_week,
            update_data
                .start_time
                .as_deref()
                .unwrap_or(&existing.start_time),
            update_data.end_time.as_deref().unwrap_or(&existing.end_time),
        )
        .map_err(invalid)?;
        let room = match update_data.room.clone() {
            Some(room) => optional_text(room),
            None => existing.room.clone(),
        };
        let teacher_id = update_data.teacher_id.unwrap_or(existing.teacher_id);

        if let Some(subject_id) = update_data.subject_id {
            let section = require_section(&storage, scope.branch_id, existing.section_id).await?;
            let class = require_class(&storage, scope.branch_id, section.class_id).await?;
            let subject = require_subject(&storage, scope.branch_id, subject_id).await?;
            require_applicable(&subject, &class)?;
        }
        if update_data.teacher_id.is_some() {
            require_active_teacher(&storage, scope.branch_id, teacher_id).await?;
        }

        let slot = PeriodSlot {
            section_id: existing.section_id,
            teacher_id,
            day_of_week,
            start,
            end,
            room: room.as_deref(),
        };
        ensure_no_conflicts(&storage, scope.branch_id, &slot, Some(period_id)).await?;

        let update_data = UpdateTimetablePeriodRequest {
            start_time: update_data.start_time.map(|_| format_time(start)),
            end_time: update_data.end_time.map(|_| format_time(end)),
            room: update_data.room.map(optional_text),
            ..update_data
        };
        match storage
            .update_period(scope.branch_id, period_id, update_data)
            .await?
        {
            Some(period) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                period,
                "Timetable period updated successfully",
            ))),
            None => Err(period_not_found()),
        }
    })
    .await
}
