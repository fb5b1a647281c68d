use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    EnrollmentService, already_enrolled, check_roll_number, enrollment_not_found, section_full,
};
use crate::models::ApiResponse;
use crate::models::enrollments::requests::UpdateEnrollmentRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::storage::EnrollmentWrite;

pub async fn update_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_id: i64,
    update_data: UpdateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        check_roll_number(update_data.roll_number.flatten()).map_err(invalid)?;

        // 重新激活时存储层会再次检查年度唯一与容量
        match storage
            .update_enrollment(scope.branch_id, enrollment_id, update_data)
            .await?
        {
            EnrollmentWrite::Saved(enrollment) => Ok(HttpResponse::Ok().json(
                ApiResponse::success(enrollment, "Enrollment updated successfully"),
            )),
            EnrollmentWrite::NotFound => Err(enrollment_not_found()),
            EnrollmentWrite::SectionFull => Err(section_full()),
            EnrollmentWrite::AlreadyEnrolled => Err(already_enrolled()),
        }
    })
    .await
}
