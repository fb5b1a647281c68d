use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::grade_subjects::validate_explicit_range;
use crate::utils::validate::{normalize_subject_code, require_text};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        let subject_data = normalize(subject_data).map_err(invalid)?;

        let subject = storage
            .create_subject(scope.branch_id, subject_data)
            .await?;
        info!(
            "Subject {} ({}) created, grades {}-{}",
            subject.id, subject.code, subject.applicable_from, subject.applicable_to
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            subject,
            "Subject created successfully",
        )))
    })
    .await
}

fn normalize(req: CreateSubjectRequest) -> Result<CreateSubjectRequest, String> {
    validate_explicit_range(req.min_grade, req.max_grade)?;
    Ok(CreateSubjectRequest {
        code: normalize_subject_code(&req.code)?,
        name: require_text("name", &req.name, 64)?,
        min_grade: req.min_grade,
        max_grade: req.max_grade,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_normalised() {
        let req = CreateSubjectRequest {
            code: " Social Studies ".to_string(),
            name: "Social Studies".to_string(),
            min_grade: None,
            max_grade: None,
        };
        assert_eq!(normalize(req).unwrap().code, "social_studies");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let req = CreateSubjectRequest {
            code: "robotics".to_string(),
            name: "Robotics".to_string(),
            min_grade: Some(9),
            max_grade: Some(6),
        };
        assert!(normalize(req).is_err());
    }
}
