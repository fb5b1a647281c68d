use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::requests::CreateClassRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::{require_text, validate_academic_year, validate_grade_level};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        let class_data = normalize(class_data).map_err(invalid)?;

        let class = storage.create_class(scope.branch_id, class_data).await?;
        info!(
            "Class {} ({}, grade {}) created in branch {}",
            class.id, class.name, class.grade_level, scope.branch_id
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
    })
    .await
}

fn normalize(req: CreateClassRequest) -> Result<CreateClassRequest, String> {
    validate_grade_level(req.grade_level)?;
    let academic_year = req.academic_year.trim().to_string();
    validate_academic_year(&academic_year)?;

    Ok(CreateClassRequest {
        name: require_text("name", &req.name, 64)?,
        grade_level: req.grade_level,
        academic_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(grade_level: i32, academic_year: &str) -> CreateClassRequest {
        CreateClassRequest {
            name: " Grade 5 ".to_string(),
            grade_level,
            academic_year: academic_year.to_string(),
        }
    }

    #[test]
    fn test_normalize_accepts_kindergarten_and_trims() {
        let normalized = normalize(request(0, "2025-2026")).unwrap();
        assert_eq!(normalized.name, "Grade 5");
    }

    #[test]
    fn test_normalize_rejects_bad_grade_and_year() {
        assert!(normalize(request(13, "2025-2026")).is_err());
        assert!(normalize(request(-1, "2025-2026")).is_err());
        assert!(normalize(request(5, "2025-2027")).is_err());
        assert!(normalize(request(5, "2025/26")).is_err());
    }
}
