use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TimetableService, period_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_period(
    service: &TimetableService,
    request: &HttpRequest,
    period_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_period(scope.branch_id, period_id).await? {
            Some(period) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                period,
                "Timetable period retrieved successfully",
            ))),
            None => Err(period_not_found()),
        }
    })
    .await
}
