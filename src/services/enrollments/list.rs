use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::enrollments::requests::EnrollmentListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    query: EnrollmentListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_enrollments_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Enrollment list retrieved successfully"))
    })
    .await
}
