use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeacherService, check_contact, check_hire_date};
use crate::models::ApiResponse;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::{optional_text, require_text};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        let teacher_data = normalize(teacher_data).map_err(invalid)?;

        let teacher = storage
            .create_teacher(scope.branch_id, teacher_data)
            .await?;
        info!(
            "Teacher {} ({}) added to branch {}",
            teacher.id, teacher.employee_no, scope.branch_id
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            teacher,
            "Teacher created successfully",
        )))
    })
    .await
}

fn normalize(req: CreateTeacherRequest) -> Result<CreateTeacherRequest, String> {
    let email = optional_text(req.email);
    let phone = optional_text(req.phone);
    check_contact(email.as_deref(), phone.as_deref())?;

    Ok(CreateTeacherRequest {
        employee_no: require_text("employee_no", &req.employee_no, 32)?,
        first_name: require_text("first_name", &req.first_name, 64)?,
        last_name: require_text("last_name", &req.last_name, 64)?,
        email,
        phone,
        specialization: optional_text(req.specialization),
        hire_date: optional_text(req.hire_date)
            .map(|d| check_hire_date(&d))
            .transpose()?,
        status: req.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_validates_contact() {
        let req = CreateTeacherRequest {
            employee_no: "EMP-7".to_string(),
            first_name: "Ravi".to_string(),
            last_name: "Kumar".to_string(),
            email: Some("ravi@".to_string()),
            phone: None,
            specialization: None,
            hire_date: None,
            status: None,
        };
        assert!(normalize(req).is_err());
    }
}
