use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, check_date_of_birth, check_guardian_contact};
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, invalid, not_found};
use crate::utils::validate::{optional_text, require_text};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        let update_data = normalize(update_data).map_err(invalid)?;

        match storage
            .update_student(scope.branch_id, student_id, update_data)
            .await?
        {
            Some(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            ))),
            None => Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        }
    })
    .await
}

fn normalize(update: UpdateStudentRequest) -> Result<UpdateStudentRequest, String> {
    // 外层 Some(None) 表示清空字段
    let guardian_phone = update.guardian_phone.map(optional_text);
    let guardian_email = update.guardian_email.map(optional_text);
    check_guardian_contact(
        guardian_phone.as_ref().and_then(|p| p.as_deref()),
        guardian_email.as_ref().and_then(|e| e.as_deref()),
    )?;

    let date_of_birth = match update.date_of_birth.map(optional_text) {
        Some(Some(date)) => Some(Some(check_date_of_birth(&date)?)),
        other => other,
    };

    Ok(UpdateStudentRequest {
        admission_no: update
            .admission_no
            .map(|v| require_text("admission_no", &v, 32))
            .transpose()?,
        first_name: update
            .first_name
            .map(|v| require_text("first_name", &v, 64))
            .transpose()?,
        last_name: update
            .last_name
            .map(|v| require_text("last_name", &v, 64))
            .transpose()?,
        gender: update.gender,
        date_of_birth,
        guardian_name: update.guardian_name.map(optional_text),
        guardian_phone,
        guardian_email,
        status: update.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_guardian_email_clears_field() {
        let update = UpdateStudentRequest {
            guardian_email: Some(Some("   ".to_string())),
            ..Default::default()
        };
        let normalized = normalize(update).unwrap();
        assert_eq!(normalized.guardian_email, Some(None));
        assert_eq!(normalized.first_name, None);
    }

    #[test]
    fn test_invalid_date_of_birth_rejected() {
        let update = UpdateStudentRequest {
            date_of_birth: Some(Some("09/04/2015".to_string())),
            ..Default::default()
        };
        assert!(normalize(update).is_err());
    }
}
