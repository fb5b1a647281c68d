pub mod applicable;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::{
    ApplicableSubjectsQuery, CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
};
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        query: SubjectListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request, query).await
    }

    // 某年级适用的科目
    pub async fn list_applicable(
        &self,
        request: &HttpRequest,
        query: ApplicableSubjectsQuery,
    ) -> ActixResult<HttpResponse> {
        applicable::list_applicable(self, request, query).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        subject_data: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, request, subject_data).await
    }

    pub async fn get_subject(&self, request: &HttpRequest, subject_id: i64) -> ActixResult<HttpResponse> {
        get::get_subject(self, request, subject_id).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        update_data: UpdateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, request, subject_id, update_data).await
    }

    pub async fn delete_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, request, subject_id).await
    }
}
