use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EnrollmentService, enrollment_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn delete_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        if !storage.delete_enrollment(scope.branch_id, enrollment_id).await? {
            return Err(enrollment_not_found());
        }
        info!("Enrollment {} deleted from branch {}", enrollment_id, scope.branch_id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Enrollment deleted successfully",
        )))
    })
    .await
}
