pub mod bulk;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::exams::entities::Exam;
use crate::models::marks::requests::{
    BulkMarksRequest, CreateMarkRequest, MarkListParams, UpdateMarkRequest,
};
use crate::services::{bad_reference, not_found};
use crate::storage::Storage;

pub struct MarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_marks(
        &self,
        request: &HttpRequest,
        query: MarkListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_marks(self, request, query).await
    }

    pub async fn create_mark(
        &self,
        request: &HttpRequest,
        mark_data: CreateMarkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_mark(self, request, mark_data).await
    }

    pub async fn get_mark(&self, request: &HttpRequest, mark_id: i64) -> ActixResult<HttpResponse> {
        get::get_mark(self, request, mark_id).await
    }

    pub async fn update_mark(
        &self,
        request: &HttpRequest,
        mark_id: i64,
        update_data: UpdateMarkRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_mark(self, request, mark_id, update_data).await
    }

    pub async fn delete_mark(&self, request: &HttpRequest, mark_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_mark(self, request, mark_id).await
    }

    pub async fn bulk_marks(
        &self,
        request: &HttpRequest,
        bulk_data: BulkMarksRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_marks(self, request, bulk_data).await
    }
}

pub(crate) fn mark_not_found() -> HttpResponse {
    not_found(ErrorCode::MarkNotFound, "Mark not found")
}

pub(crate) async fn require_exam(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    exam_id: i64,
) -> Result<Exam, HttpResponse> {
    storage.get_exam(branch_id, exam_id).await?.ok_or_else(|| {
        bad_reference(
            ErrorCode::ExamNotFound,
            format!("Exam {exam_id} does not exist in this branch"),
        )
    })
}

/// 学生须在考试所属年级班有注册记录
pub(crate) async fn require_in_class(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    exam: &Exam,
    student_id: i64,
) -> Result<(), HttpResponse> {
    if storage
        .is_enrolled_in_class(branch_id, student_id, exam.class_id)
        .await?
    {
        return Ok(());
    }
    Err(bad_reference(
        ErrorCode::StudentNotInClass,
        format!(
            "Student {student_id} is not enrolled in class {}",
            exam.class_id
        ),
    ))
}

pub(crate) fn check_marks(marks_obtained: f64, exam: &Exam) -> Result<(), String> {
    if !marks_obtained.is_finite() || marks_obtained < 0.0 || marks_obtained > exam.max_marks {
        return Err(format!(
            "marks_obtained must be between 0 and {}",
            exam.max_marks
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn exam(max_marks: f64) -> Exam {
        Exam {
            id: 1,
            branch_id: 1,
            class_id: 1,
            subject_id: 1,
            name: "Final".to_string(),
            exam_date: "2025-12-01".to_string(),
            max_marks,
            pass_marks: max_marks / 2.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_marks_bounds() {
        let exam = exam(80.0);
        assert!(check_marks(0.0, &exam).is_ok());
        assert!(check_marks(80.0, &exam).is_ok());
        assert!(check_marks(80.5, &exam).is_err());
        assert!(check_marks(-0.5, &exam).is_err());
        assert!(check_marks(f64::INFINITY, &exam).is_err());
    }
}
