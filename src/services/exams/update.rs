use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, check_marks_range, exam_not_found};
use crate::models::ApiResponse;
use crate::models::exams::requests::UpdateExamRequest;
use crate::services::references::{require_applicable, require_class, require_subject};
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::{parse_date, require_text};

pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    update_data: UpdateExamRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let existing = storage
            .get_exam(scope.branch_id, exam_id)
            .await?
            .ok_or_else(exam_not_found)?;

        let max_marks = update_data.max_marks.unwrap_or(existing.max_marks);
        let pass_marks = update_data.pass_marks.unwrap_or(existing.pass_marks);
        check_marks_range(max_marks, pass_marks).map_err(invalid)?;

        // 已录入的成绩不能超过新的满分
        if update_data.max_marks.is_some()
            && let Some(highest) = storage.highest_mark_for_exam(scope.branch_id, exam_id).await?
            && highest > max_marks
        {
            return Err(invalid(format!(
                "max_marks cannot be lower than an existing mark of {highest}"
            )));
        }

        if let Some(subject_id) = update_data.subject_id {
            let class = require_class(&storage, scope.branch_id, existing.class_id).await?;
            let subject = require_subject(&storage, scope.branch_id, subject_id).await?;
            require_applicable(&subject, &class)?;
        }

        let update_data = UpdateExamRequest {
            name: update_data
                .name
                .map(|n| require_text("name", &n, 64))
                .transpose()
                .map_err(invalid)?,
            exam_date: update_data
                .exam_date
                .map(|d| parse_date(&d).map(|d| d.to_string()))
                .transpose()
                .map_err(invalid)?,
            ..update_data
        };

        match storage
            .update_exam(scope.branch_id, exam_id, update_data)
            .await?
        {
            Some(exam) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                exam,
                "Exam updated successfully",
            ))),
            None => Err(exam_not_found()),
        }
    })
    .await
}
