use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TimetableService, period_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn delete_period(
    service: &TimetableService,
    request: &HttpRequest,
    period_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_period(scope.branch_id, period_id).await? {
            return Err(period_not_found());
        }
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Timetable period deleted successfully",
        )))
    })
    .await
}
