use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MarkService, check_marks, require_exam, require_in_class};
use crate::models::ApiResponse;
use crate::models::exams::entities::Exam;
use crate::models::marks::requests::{BulkMarkEntry, BulkMarksRequest};
use crate::services::references::require_student;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::optional_text;

const MAX_BULK_ENTRIES: usize = 500;

/// 任一条目不合法则整批拒绝
fn normalize_entries(entries: Vec<BulkMarkEntry>, exam: &Exam) -> Result<Vec<BulkMarkEntry>, String> {
    if entries.is_empty() {
        return Err("entries must not be empty".to_string());
    }
    if entries.len() > MAX_BULK_ENTRIES {
        return Err(format!("at most {MAX_BULK_ENTRIES} entries per request"));
    }

    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .map(|entry| {
            if !seen.insert(entry.student_id) {
                return Err(format!("student {} appears more than once", entry.student_id));
            }
            check_marks(entry.marks_obtained, exam)
                .map_err(|e| format!("student {}: {e}", entry.student_id))?;
            Ok(BulkMarkEntry {
                remarks: optional_text(entry.remarks),
                ..entry
            })
        })
        .collect()
}

pub async fn bulk_marks(
    service: &MarkService,
    request: &HttpRequest,
    bulk_data: BulkMarksRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let exam = require_exam(&storage, scope.branch_id, bulk_data.exam_id).await?;
        let entries = normalize_entries(bulk_data.entries, &exam).map_err(invalid)?;
        for entry in &entries {
            require_student(&storage, scope.branch_id, entry.student_id).await?;
            require_in_class(&storage, scope.branch_id, &exam, entry.student_id).await?;
        }

        let result = storage
            .bulk_upsert_marks(scope.branch_id, &exam, entries)
            .await?;
        info!(
            "Bulk marks for exam {}: {} created, {} updated",
            exam.id, result.created, result.updated
        );
        Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Marks saved successfully")))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn exam() -> Exam {
        Exam {
            id: 3,
            branch_id: 1,
            class_id: 2,
            subject_id: 4,
            name: "Unit test 1".to_string(),
            exam_date: "2025-09-15".to_string(),
            max_marks: 25.0,
            pass_marks: 10.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn entry(student_id: i64, marks_obtained: f64) -> BulkMarkEntry {
        BulkMarkEntry {
            student_id,
            marks_obtained,
            remarks: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_entries_are_normalized() {
        let entries = normalize_entries(vec![entry(1, 20.0), entry(2, 0.0)], &exam()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.remarks.is_none()));
    }

    #[test]
    fn test_whole_batch_rejected() {
        assert!(normalize_entries(vec![], &exam()).is_err());

        let err = normalize_entries(vec![entry(1, 20.0), entry(2, 26.0)], &exam()).unwrap_err();
        assert!(err.contains("student 2"));

        let err = normalize_entries(vec![entry(1, 20.0), entry(1, 21.0)], &exam()).unwrap_err();
        assert!(err.contains("more than once"));
    }
}
