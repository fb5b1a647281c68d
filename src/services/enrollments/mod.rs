pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListParams, UpdateEnrollmentRequest,
};
use crate::services::{conflict, not_found};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        query: EnrollmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, request, query).await
    }

    pub async fn create_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_data: CreateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_enrollment(self, request, enrollment_data).await
    }

    pub async fn get_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_enrollment(self, request, enrollment_id).await
    }

    pub async fn update_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
        update_data: UpdateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_enrollment(self, request, enrollment_id, update_data).await
    }

    pub async fn delete_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_enrollment(self, request, enrollment_id).await
    }
}

pub(crate) fn section_full() -> HttpResponse {
    conflict(ErrorCode::SectionFull, "Section has reached its capacity")
}

pub(crate) fn already_enrolled() -> HttpResponse {
    conflict(
        ErrorCode::DuplicateEnrollment,
        "Student already has an active enrollment for this academic year",
    )
}

pub(crate) fn enrollment_not_found() -> HttpResponse {
    not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")
}

pub(crate) fn check_roll_number(roll_number: Option<i32>) -> Result<(), &'static str> {
    match roll_number {
        Some(n) if n <= 0 => Err("Roll number must be a positive integer"),
        _ => Ok(()),
    }
}
