pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod results;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::exams::requests::{CreateExamRequest, ExamListParams, UpdateExamRequest};
use crate::services::not_found;
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        query: ExamListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, request, query).await
    }

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        exam_data: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, exam_data).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        get::get_exam(self, request, exam_id).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        update_data: UpdateExamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, exam_id, update_data).await
    }

    pub async fn delete_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, exam_id).await
    }

    // 成绩汇总
    pub async fn exam_results(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        results::exam_results(self, request, exam_id).await
    }
}

pub(crate) fn exam_not_found() -> HttpResponse {
    not_found(ErrorCode::ExamNotFound, "Exam not found")
}

/// 满分须为正数，及格线在 `0..=满分`
pub(crate) fn check_marks_range(max_marks: f64, pass_marks: f64) -> Result<(), &'static str> {
    if !max_marks.is_finite() || max_marks <= 0.0 {
        return Err("max_marks must be greater than 0");
    }
    if !pass_marks.is_finite() || pass_marks < 0.0 || pass_marks > max_marks {
        return Err("pass_marks must be between 0 and max_marks");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_range() {
        assert!(check_marks_range(100.0, 35.0).is_ok());
        assert!(check_marks_range(100.0, 100.0).is_ok());
        assert!(check_marks_range(0.0, 0.0).is_err());
        assert!(check_marks_range(50.0, 51.0).is_err());
        assert!(check_marks_range(50.0, -1.0).is_err());
        assert!(check_marks_range(f64::NAN, 10.0).is_err());
    }
}
