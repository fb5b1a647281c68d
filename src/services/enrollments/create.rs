use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EnrollmentService, already_enrolled, check_roll_number, section_full};
use crate::models::classes::entities::Class;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::references::{require_active_student, require_class, require_section};
use crate::services::{bad_reference, branch_scope, finish, invalid, today};
use crate::storage::{EnrollmentWrite, NewEnrollment};
use crate::utils::validate::{optional_text, parse_date};

pub async fn create_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_data: CreateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        check_roll_number(enrollment_data.roll_number).map_err(invalid)?;
        require_active_student(&storage, scope.branch_id, enrollment_data.student_id).await?;
        let section = require_section(&storage, scope.branch_id, enrollment_data.section_id).await?;
        let class = require_class(&storage, scope.branch_id, section.class_id).await?;

        let academic_year =
            resolve_academic_year(enrollment_data.academic_year, &class).map_err(invalid)?;
        let enrolled_at = match optional_text(enrollment_data.enrolled_at) {
            Some(date) => parse_date(&date).map_err(invalid)?.to_string(),
            None => today(),
        };

        let new = NewEnrollment {
            student_id: enrollment_data.student_id,
            section_id: section.id,
            academic_year,
            roll_number: enrollment_data.roll_number,
            enrolled_at,
        };
        match storage.create_enrollment(scope.branch_id, new).await? {
            EnrollmentWrite::Saved(enrollment) => {
                info!(
                    "Student {} enrolled in section {} for {}",
                    enrollment.student_id, enrollment.section_id, enrollment.academic_year
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    enrollment,
                    "Enrollment created successfully",
                )))
            }
            EnrollmentWrite::NotFound => Err(bad_reference(
                ErrorCode::SectionNotFound,
                "Student or section no longer exists in this branch",
            )),
            EnrollmentWrite::SectionFull => Err(section_full()),
            EnrollmentWrite::AlreadyEnrolled => Err(already_enrolled()),
        }
    })
    .await
}

/// 学年缺省取班级学年，显式给出时必须一致
fn resolve_academic_year(requested: Option<String>, class: &Class) -> Result<String, String> {
    match optional_text(requested) {
        None => Ok(class.academic_year.clone()),
        Some(year) if year == class.academic_year => Ok(year),
        Some(year) => Err(format!(
            "Academic year {year} does not match the class year {}",
            class.academic_year
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn class() -> Class {
        Class {
            id: 1,
            branch_id: 1,
            name: "Grade 5".to_string(),
            grade_level: 5,
            academic_year: "2025-2026".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_academic_year_defaults_to_class_year() {
        assert_eq!(resolve_academic_year(None, &class()).unwrap(), "2025-2026");
        assert_eq!(
            resolve_academic_year(Some(" ".to_string()), &class()).unwrap(),
            "2025-2026"
        );
    }

    #[test]
    fn test_academic_year_must_match_class() {
        assert!(resolve_academic_year(Some("2025-2026".to_string()), &class()).is_ok());
        assert!(resolve_academic_year(Some("2026-2027".to_string()), &class()).is_err());
    }
}
