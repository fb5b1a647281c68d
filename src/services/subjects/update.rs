use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, conflict, finish, invalid, not_found};
use crate::utils::grade_subjects::{applicable_range, validate_explicit_range};
use crate::utils::validate::{normalize_subject_code, require_text};

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    update_data: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let existing = storage
            .get_subject(scope.branch_id, subject_id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::SubjectNotFound, "Subject not found"))?;

        // 与未修改的一端合并后再校验
        let min_grade = update_data.min_grade.unwrap_or(existing.min_grade);
        let max_grade = update_data.max_grade.unwrap_or(existing.max_grade);
        validate_explicit_range(min_grade, max_grade).map_err(invalid)?;

        let update_data = UpdateSubjectRequest {
            code: update_data
                .code
                .map(|c| normalize_subject_code(&c))
                .transpose()
                .map_err(invalid)?,
            name: update_data
                .name
                .map(|n| require_text("name", &n, 64))
                .transpose()
                .map_err(invalid)?,
            ..update_data
        };

        // 新的适用范围须覆盖已有考试与课表所在年级
        let code = update_data.code.as_deref().unwrap_or(&existing.code);
        let range = applicable_range(code, min_grade, max_grade);
        if range != (existing.applicable_from, existing.applicable_to) {
            let grades = storage
                .list_subject_grade_levels(scope.branch_id, subject_id)
                .await?;
            if let Some(grade) = first_uncovered(range, &grades) {
                return Err(conflict(
                    ErrorCode::SubjectNotApplicable,
                    format!(
                        "Subject would no longer apply to grade {grade}, which has exams or timetable periods for it"
                    ),
                ));
            }
        }

        match storage
            .update_subject(scope.branch_id, subject_id, update_data)
            .await?
        {
            Some(subject) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                subject,
                "Subject updated successfully",
            ))),
            None => Err(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        }
    })
    .await
}

fn first_uncovered((from, to): (i32, i32), grades: &[i32]) -> Option<i32> {
    grades.iter().copied().find(|g| !(from..=to).contains(g))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_must_cover_used_grades() {
        assert_eq!(first_uncovered((1, 5), &[2, 5]), None);
        assert_eq!(first_uncovered((6, 8), &[5, 7]), Some(5));
        assert_eq!(first_uncovered((0, 12), &[]), None);

        // 改为 physics 代码后推断为 9-12
        let range = applicable_range("physics", None, None);
        assert_eq!(first_uncovered(range, &[8, 10]), Some(8));
    }
}
