use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, check_date_of_birth, check_guardian_contact};
use crate::models::ApiResponse;
use crate::models::students::requests::CreateStudentRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::{optional_text, require_text};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        let student_data = normalize(student_data).map_err(invalid)?;

        let student = storage
            .create_student(scope.branch_id, student_data)
            .await?;
        info!(
            "Student {} ({}) admitted to branch {}",
            student.id, student.admission_no, scope.branch_id
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            student,
            "Student created successfully",
        )))
    })
    .await
}

fn normalize(req: CreateStudentRequest) -> Result<CreateStudentRequest, String> {
    let guardian_phone = optional_text(req.guardian_phone);
    let guardian_email = optional_text(req.guardian_email);
    check_guardian_contact(guardian_phone.as_deref(), guardian_email.as_deref())?;

    Ok(CreateStudentRequest {
        admission_no: require_text("admission_no", &req.admission_no, 32)?,
        first_name: require_text("first_name", &req.first_name, 64)?,
        last_name: require_text("last_name", &req.last_name, 64)?,
        gender: req.gender,
        date_of_birth: optional_text(req.date_of_birth)
            .map(|d| check_date_of_birth(&d))
            .transpose()?,
        guardian_name: optional_text(req.guardian_name),
        guardian_phone,
        guardian_email,
        status: req.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            admission_no: " ADM-001 ".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            gender: None,
            date_of_birth: Some("".to_string()),
            guardian_name: Some("  ".to_string()),
            guardian_phone: Some("9876543210".to_string()),
            guardian_email: None,
            status: None,
        }
    }

    #[test]
    fn test_normalize_trims_and_drops_blank_fields() {
        let normalized = normalize(request()).unwrap();
        assert_eq!(normalized.admission_no, "ADM-001");
        assert_eq!(normalized.date_of_birth, None);
        assert_eq!(normalized.guardian_name, None);
    }

    #[test]
    fn test_normalize_rejects_missing_name() {
        let mut req = request();
        req.first_name = " ".to_string();
        assert!(normalize(req).is_err());
    }
}
