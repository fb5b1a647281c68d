pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::storage::Storage;
use crate::utils::validate::{parse_date, validate_email, validate_phone};

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_teachers(
        &self,
        request: &HttpRequest,
        query: TeacherListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request, query).await
    }

    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        teacher_data: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, request, teacher_data).await
    }

    pub async fn get_teacher(&self, request: &HttpRequest, teacher_id: i64) -> ActixResult<HttpResponse> {
        get::get_teacher(self, request, teacher_id).await
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        update_data: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, request, teacher_id, update_data).await
    }

    pub async fn delete_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, request, teacher_id).await
    }
}

pub(crate) fn check_contact(email: Option<&str>, phone: Option<&str>) -> Result<(), &'static str> {
    if let Some(email) = email {
        validate_email(email)?;
    }
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }
    Ok(())
}

pub(crate) fn check_hire_date(value: &str) -> Result<String, String> {
    parse_date(value).map(|d| d.to_string())
}
