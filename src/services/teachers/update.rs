use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, check_contact, check_hire_date};
use crate::models::teachers::requests::UpdateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, invalid, not_found};
use crate::utils::validate::{optional_text, require_text};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    update_data: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        let update_data = normalize(update_data).map_err(invalid)?;

        match storage
            .update_teacher(scope.branch_id, teacher_id, update_data)
            .await?
        {
            Some(teacher) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            ))),
            None => Err(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        }
    })
    .await
}

fn normalize(update: UpdateTeacherRequest) -> Result<UpdateTeacherRequest, String> {
    let email = update.email.map(optional_text);
    let phone = update.phone.map(optional_text);
    check_contact(
        email.as_ref().and_then(|e| e.as_deref()),
        phone.as_ref().and_then(|p| p.as_deref()),
    )?;

    let hire_date = match update.hire_date.map(optional_text) {
        Some(Some(date)) => Some(Some(check_hire_date(&date)?)),
        other => other,
    };

    Ok(UpdateTeacherRequest {
        employee_no: update
            .employee_no
            .map(|v| require_text("employee_no", &v, 32))
            .transpose()?,
        first_name: update
            .first_name
            .map(|v| require_text("first_name", &v, 64))
            .transpose()?,
        last_name: update
            .last_name
            .map(|v| require_text("last_name", &v, 64))
            .transpose()?,
        email,
        phone,
        specialization: update.specialization.map(optional_text),
        hire_date,
        status: update.status,
    })
}
