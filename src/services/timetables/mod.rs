pub mod create;
pub mod delete;
pub mod get;
pub mod grid;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use chrono::NaiveTime;

use crate::models::timetables::entities::TimetableConflict;
use crate::models::timetables::requests::{
    CreateTimetablePeriodRequest, TimetableListParams, UpdateTimetablePeriodRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;
use crate::storage::Storage;
use crate::utils::timetable::{PeriodSlot, find_conflicts};
use crate::utils::validate::parse_time;

pub struct TimetableService {
    storage: Option<Arc<dyn Storage>>,
}

impl TimetableService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_periods(
        &self,
        request: &HttpRequest,
        query: TimetableListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_periods(self, request, query).await
    }

    pub async fn create_period(
        &self,
        request: &HttpRequest,
        period_data: CreateTimetablePeriodRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_period(self, request, period_data).await
    }

    pub async fn get_period(
        &self,
        request: &HttpRequest,
        period_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_period(self, request, period_id).await
    }

    pub async fn update_period(
        &self,
        request: &HttpRequest,
        period_id: i64,
        update_data: UpdateTimetablePeriodRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_period(self, request, period_id, update_data).await
    }

    pub async fn delete_period(
        &self,
        request: &HttpRequest,
        period_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_period(self, request, period_id).await
    }

    // 分组周课表
    pub async fn section_timetable(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        grid::section_timetable(self, request, section_id).await
    }
}

pub(crate) fn period_not_found() -> HttpResponse {
    not_found(ErrorCode::TimetablePeriodNotFound, "Timetable period not found")
}

/// 星期在 1..=7，开始早于结束
pub(crate) fn check_slot(
    day_of_week: i32,
    start_time: &str,
    end_time: &str,
) -> Result<(NaiveTime, NaiveTime), String> {
    if !(1..=7).contains(&day_of_week) {
        return Err("day_of_week must be between 1 (Monday) and 7 (Sunday)".to_string());
    }
    let start = parse_time(start_time)?;
    let end = parse_time(end_time)?;
    if start >= end {
        return Err("start_time must be earlier than end_time".to_string());
    }
    Ok((start, end))
}

pub(crate) fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// 与同日已有节次比较，有冲突时返回 409 并附带冲突列表
pub(crate) async fn ensure_no_conflicts(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    slot: &PeriodSlot<'_>,
    exclude_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let same_day = storage
        .list_periods_on_day(branch_id, slot.day_of_week)
        .await?;
    let conflicts: Vec<TimetableConflict> = find_conflicts(slot, &same_day, exclude_id);
    if conflicts.is_empty() {
        return Ok(());
    }
    Err(
        HttpResponse::build(StatusCode::CONFLICT).json(ApiResponse::error(
            ErrorCode::TimetableConflict,
            conflicts,
            "Timetable period overlaps existing periods",
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_slot() {
        let (start, end) = check_slot(1, "08:00", "08:45").unwrap();
        assert_eq!(format_time(start), "08:00");
        assert_eq!(format_time(end), "08:45");

        assert!(check_slot(0, "08:00", "08:45").is_err());
        assert!(check_slot(8, "08:00", "08:45").is_err());
        assert!(check_slot(3, "09:00", "09:00").is_err());
        assert!(check_slot(3, "10:00", "09:00").is_err());
        assert!(check_slot(3, "9am", "10:00").is_err());
    }
}
