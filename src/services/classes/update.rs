use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::subjects::entities::Subject;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, conflict, finish, invalid, not_found};
use crate::utils::validate::{require_text, validate_academic_year, validate_grade_level};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;
        let update_data = normalize(update_data).map_err(invalid)?;

        // 年级变更后，已有考试与课表的科目须仍然适用
        if let Some(grade) = update_data.grade_level {
            let class = storage
                .get_class(scope.branch_id, class_id)
                .await?
                .ok_or_else(|| not_found(ErrorCode::ClassNotFound, "Class not found"))?;
            if class.grade_level != grade {
                let used = storage
                    .list_class_subject_ids(scope.branch_id, class_id)
                    .await?;
                if !used.is_empty() {
                    let subjects = storage.list_all_subjects(scope.branch_id).await?;
                    if let Some(subject) = inapplicable_subject(&subjects, &used, grade) {
                        return Err(conflict(
                            ErrorCode::SubjectNotApplicable,
                            format!(
                                "Subject '{}' is scheduled or examined for this class and does not apply to grade {grade}",
                                subject.code
                            ),
                        ));
                    }
                }
            }
        }

        match storage
            .update_class(scope.branch_id, class_id, update_data)
            .await?
        {
            Some(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                class,
                "Class updated successfully",
            ))),
            None => Err(not_found(ErrorCode::ClassNotFound, "Class not found")),
        }
    })
    .await
}

fn inapplicable_subject<'a>(
    subjects: &'a [Subject],
    used: &[i64],
    grade: i32,
) -> Option<&'a Subject> {
    subjects
        .iter()
        .filter(|s| used.contains(&s.id))
        .find(|s| !s.applies_to(grade))
}

fn normalize(update: UpdateClassRequest) -> Result<UpdateClassRequest, String> {
    if let Some(grade) = update.grade_level {
        validate_grade_level(grade)?;
    }
    let academic_year = update.academic_year.map(|y| y.trim().to_string());
    if let Some(year) = &academic_year {
        validate_academic_year(year)?;
    }

    Ok(UpdateClassRequest {
        name: update
            .name
            .map(|v| require_text("name", &v, 64))
            .transpose()?,
        grade_level: update.grade_level,
        academic_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn subject(id: i64, code: &str, from: i32, to: i32) -> Subject {
        Subject {
            id,
            branch_id: 1,
            code: code.to_string(),
            name: code.to_string(),
            min_grade: None,
            max_grade: None,
            applicable_from: from,
            applicable_to: to,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_grade_change_checks_used_subjects() {
        let subjects = vec![
            subject(1, "english", 0, 12),
            subject(2, "evs", 1, 5),
            subject(3, "physics", 9, 12),
        ];

        // physics 未被该班使用，不参与判断
        assert!(inapplicable_subject(&subjects, &[1, 2], 4).is_none());
        let blocked = inapplicable_subject(&subjects, &[1, 2], 7).expect("evs blocks grade 7");
        assert_eq!(blocked.code, "evs");
        assert!(inapplicable_subject(&subjects, &[], 11).is_none());
    }
}
