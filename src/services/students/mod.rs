pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::AttendanceSummaryQuery;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::storage::Storage;
use crate::utils::validate::{parse_date, validate_email, validate_phone};

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    pub async fn get_student(&self, request: &HttpRequest, student_id: i64) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }

    // 导出 CSV
    pub async fn export_students(
        &self,
        request: &HttpRequest,
        query: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        export::export_students(self, request, query).await
    }

    pub async fn attendance_summary(
        &self,
        request: &HttpRequest,
        student_id: i64,
        query: AttendanceSummaryQuery,
    ) -> ActixResult<HttpResponse> {
        summary::attendance_summary(self, request, student_id, query).await
    }

    pub async fn fee_balance(&self, request: &HttpRequest, student_id: i64) -> ActixResult<HttpResponse> {
        summary::fee_balance(self, request, student_id).await
    }
}

// 出生日期不能晚于今天
pub(crate) fn check_date_of_birth(value: &str) -> Result<String, String> {
    let date = parse_date(value)?;
    if date > chrono::Utc::now().date_naive() {
        return Err("date_of_birth must not be in the future".to_string());
    }
    Ok(date.to_string())
}

pub(crate) fn check_guardian_contact(
    phone: Option<&str>,
    email: Option<&str>,
) -> Result<(), &'static str> {
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }
    if let Some(email) = email {
        validate_email(email)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_of_birth_rules() {
        assert_eq!(check_date_of_birth("2015-04-09").as_deref(), Ok("2015-04-09"));
        assert!(check_date_of_birth("2015-13-01").is_err());
        assert!(check_date_of_birth("2999-01-01").is_err());
    }

    #[test]
    fn test_guardian_contact() {
        assert!(check_guardian_contact(Some("+91 98765 43210"), Some("parent@example.com")).is_ok());
        assert!(check_guardian_contact(Some("call me"), None).is_err());
        assert!(check_guardian_contact(None, Some("not-an-email")).is_err());
        assert!(check_guardian_contact(None, None).is_ok());
    }
}
