use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamService, check_marks_range};
use crate::models::ApiResponse;
use crate::models::exams::requests::CreateExamRequest;
use crate::services::references::{require_applicable, require_class, require_subject};
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::{parse_date, require_text};

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_data: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let name = require_text("name", &exam_data.name, 64).map_err(invalid)?;
        let exam_date = parse_date(&exam_data.exam_date).map_err(invalid)?.to_string();
        check_marks_range(exam_data.max_marks, exam_data.pass_marks).map_err(invalid)?;

        let class = require_class(&storage, scope.branch_id, exam_data.class_id).await?;
        let subject = require_subject(&storage, scope.branch_id, exam_data.subject_id).await?;
        require_applicable(&subject, &class)?;

        let exam = storage
            .create_exam(
                scope.branch_id,
                CreateExamRequest {
                    name,
                    exam_date,
                    ..exam_data
                },
            )
            .await?;
        info!(
            "Exam {} ({}) scheduled for class {} subject {}",
            exam.id, exam.name, exam.class_id, exam.subject_id
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(exam, "Exam created successfully")))
    })
    .await
}
