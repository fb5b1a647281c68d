use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::entities::Subject;
use crate::models::subjects::requests::ApplicableSubjectsQuery;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::validate_grade_level;

pub async fn list_applicable(
    service: &SubjectService,
    request: &HttpRequest,
    query: ApplicableSubjectsQuery,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let grade = query
            .grade
            .ok_or_else(|| invalid("Query parameter 'grade' is required"))?;
        let grade = i32::try_from(grade).map_err(|_| invalid("Grade is out of range"))?;
        validate_grade_level(grade).map_err(invalid)?;

        let subjects: Vec<Subject> = storage
            .list_all_subjects(scope.branch_id)
            .await?
            .into_iter()
            .filter(|s| s.applies_to(grade))
            .collect();
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Applicable subjects retrieved successfully",
        )))
    })
    .await
}
