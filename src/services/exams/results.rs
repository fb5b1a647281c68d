use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, exam_not_found};
use crate::models::ApiResponse;
use crate::models::exams::entities::Exam;
use crate::models::exams::responses::ExamResultsResponse;
use crate::models::marks::entities::Mark;
use crate::services::{branch_scope, finish};

pub async fn exam_results(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let exam = storage
            .get_exam(scope.branch_id, exam_id)
            .await?
            .ok_or_else(exam_not_found)?;
        let marks = storage.list_marks_for_exam(scope.branch_id, &exam).await?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize(exam, &marks),
            "Exam results retrieved successfully",
        )))
    })
    .await
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn summarize(exam: Exam, marks: &[Mark]) -> ExamResultsResponse {
    let count = marks.len() as i64;
    let pass_count = marks.iter().filter(|m| m.passed).count() as i64;
    let scores = marks.iter().map(|m| m.marks_obtained);

    let (average, pass_rate) = if count == 0 {
        (None, None)
    } else {
        let total: f64 = scores.clone().sum();
        (
            Some(round2(total / count as f64)),
            Some(round2(pass_count as f64 / count as f64 * 100.0)),
        )
    };

    ExamResultsResponse {
        exam,
        count,
        average,
        highest: scores.clone().reduce(f64::max),
        lowest: scores.reduce(f64::min),
        pass_count,
        fail_count: count - pass_count,
        pass_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grading::{letter_grade, percentage};
    use chrono::Utc;

    fn exam() -> Exam {
        Exam {
            id: 9,
            branch_id: 1,
            class_id: 1,
            subject_id: 1,
            name: "Midterm".to_string(),
            exam_date: "2025-10-01".to_string(),
            max_marks: 50.0,
            pass_marks: 20.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn mark(student_id: i64, obtained: f64) -> Mark {
        let pct = percentage(obtained, 50.0);
        Mark {
            id: student_id,
            branch_id: 1,
            exam_id: 9,
            student_id,
            marks_obtained: obtained,
            remarks: None,
            percentage: pct,
            letter_grade: letter_grade(pct).to_string(),
            passed: obtained >= 20.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_statistics() {
        let marks = [mark(1, 45.0), mark(2, 18.0), mark(3, 31.5)];
        let summary = summarize(exam(), &marks);

        assert_eq!(summary.count, 3);
        assert_eq!(summary.highest, Some(45.0));
        assert_eq!(summary.lowest, Some(18.0));
        assert_eq!(summary.average, Some(31.5));
        assert_eq!(summary.pass_count, 2);
        assert_eq!(summary.fail_count, 1);
        assert_eq!(summary.pass_rate, Some(66.67));
    }

    #[test]
    fn test_empty_exam_has_no_statistics() {
        let summary = summarize(exam(), &[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, None);
        assert_eq!(summary.highest, None);
        assert_eq!(summary.pass_rate, None);
    }
}
