pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::attendance::entities::{AttendanceRecord, AttendanceSession};
use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceRecordInput, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::attendance::responses::AttendanceDetailResponse;
use crate::services::not_found;
use crate::storage::Storage;
use crate::utils::validate::optional_text;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        attendance_data: CreateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_attendance(self, request, attendance_data).await
    }

    pub async fn get_attendance(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_attendance(self, request, session_id).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        session_id: i64,
        update_data: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, request, session_id, update_data).await
    }

    pub async fn delete_attendance(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, request, session_id).await
    }
}

pub(crate) fn attendance_not_found() -> HttpResponse {
    not_found(ErrorCode::AttendanceNotFound, "Attendance session not found")
}

pub(crate) fn detail(
    session: AttendanceSession,
    records: Vec<AttendanceRecord>,
) -> AttendanceDetailResponse {
    let counts = records.iter().map(|r| r.status).collect();
    AttendanceDetailResponse {
        session,
        records,
        counts,
    }
}

/// 加载分组内在读学生，供 [`check_records`] 使用
pub(crate) async fn enrolled_students(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    section_id: i64,
) -> Result<HashSet<i64>, HttpResponse> {
    Ok(storage
        .active_student_ids_in_section(branch_id, section_id)
        .await?
        .into_iter()
        .collect())
}

/// 记录非空、学生不重复且均在该分组在读
pub(crate) fn check_records(
    records: Vec<AttendanceRecordInput>,
    enrolled: &HashSet<i64>,
) -> Result<Vec<AttendanceRecordInput>, String> {
    if records.is_empty() {
        return Err("records must not be empty".to_string());
    }

    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .map(|record| {
            if !seen.insert(record.student_id) {
                return Err(format!(
                    "student {} appears more than once",
                    record.student_id
                ));
            }
            if !enrolled.contains(&record.student_id) {
                return Err(format!(
                    "student {} is not actively enrolled in this section",
                    record.student_id
                ));
            }
            Ok(AttendanceRecordInput {
                remarks: optional_text(record.remarks),
                ..record
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;

    fn input(student_id: i64, status: AttendanceStatus) -> AttendanceRecordInput {
        AttendanceRecordInput {
            student_id,
            status,
            remarks: None,
        }
    }

    #[test]
    fn test_check_records() {
        let enrolled: HashSet<i64> = [1, 2, 3].into_iter().collect();

        let ok = check_records(
            vec![
                input(1, AttendanceStatus::Present),
                input(3, AttendanceStatus::Late),
            ],
            &enrolled,
        );
        assert_eq!(ok.map(|r| r.len()), Ok(2));

        assert!(check_records(vec![], &enrolled).is_err());

        let err = check_records(
            vec![
                input(2, AttendanceStatus::Present),
                input(2, AttendanceStatus::Absent),
            ],
            &enrolled,
        )
        .unwrap_err();
        assert!(err.contains("more than once"));

        let err = check_records(vec![input(9, AttendanceStatus::Present)], &enrolled).unwrap_err();
        assert!(err.contains("not actively enrolled"));
    }
}
