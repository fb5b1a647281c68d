use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EnrollmentService, enrollment_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_enrollment(scope.branch_id, enrollment_id).await? {
            Some(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                "Enrollment retrieved successfully",
            ))),
            None => Err(enrollment_not_found()),
        }
    })
    .await
}
