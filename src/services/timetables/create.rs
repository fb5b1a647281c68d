use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TimetableService, check_slot, ensure_no_conflicts, format_time};
use crate::models::ApiResponse;
use crate::models::timetables::requests::CreateTimetablePeriodRequest;
use crate::services::references::{
    require_active_teacher, require_applicable, require_class, require_section, require_subject,
};
use crate::services::{branch_scope, finish, invalid};
use crate::utils::timetable::PeriodSlot;
use crate::utils::validate::optional_text;

pub async fn create_period(
    service: &TimetableService,
    request: &HttpRequest,
    period_data: CreateTimetablePeriodRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let (start, end) = check_slot(
            period_data.day_of_week,
            &period_data.start_time,
            &period_data.end_time,
        )
        .map_err(invalid)?;
        let room = optional_text(period_data.room);

        let section = require_section(&storage, scope.branch_id, period_data.section_id).await?;
        let class = require_class(&storage, scope.branch_id, section.class_id).await?;
        let subject = require_subject(&storage, scope.branch_id, period_data.subject_id).await?;
        require_applicable(&subject, &class)?;
        require_active_teacher(&storage, scope.branch_id, period_data.teacher_id).await?;

        let slot = PeriodSlot {
            section_id: section.id,
            teacher_id: period_data.teacher_id,
            day_of_week: period_data.day_of_week,
            start,
            end,
            room: room.as_deref(),
        };
        ensure_no_conflicts(&storage, scope.branch_id, &slot, None).await?;

        let period = storage
            .create_period(
                scope.branch_id,
                CreateTimetablePeriodRequest {
                    start_time: format_time(start),
                    end_time: format_time(end),
                    room: room.clone(),
                    ..period_data
                },
            )
            .await?;
        info!(
            "Timetable period {} added for section {} on day {} {}-{}",
            period.id, period.section_id, period.day_of_week, period.start_time, period.end_time
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            period,
            "Timetable period created successfully",
        )))
    })
    .await
}
