pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::sections::requests::{
    CreateSectionRequest, SectionListParams, UpdateSectionRequest,
};
use crate::storage::Storage;

pub const MIN_CAPACITY: i32 = 1;
pub const MAX_CAPACITY: i32 = 200;

pub struct SectionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SectionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_sections(
        &self,
        request: &HttpRequest,
        query: SectionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_sections(self, request, query).await
    }

    pub async fn create_section(
        &self,
        request: &HttpRequest,
        section_data: CreateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_section(self, request, section_data).await
    }

    pub async fn get_section(&self, request: &HttpRequest, section_id: i64) -> ActixResult<HttpResponse> {
        get::get_section(self, request, section_id).await
    }

    pub async fn update_section(
        &self,
        request: &HttpRequest,
        section_id: i64,
        update_data: UpdateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_section(self, request, section_id, update_data).await
    }

    pub async fn delete_section(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_section(self, request, section_id).await
    }
}

pub(crate) fn check_capacity(capacity: i32) -> Result<(), String> {
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return Err(format!(
            "Capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_bounds() {
        assert!(check_capacity(1).is_ok());
        assert!(check_capacity(200).is_ok());
        assert!(check_capacity(0).is_err());
        assert!(check_capacity(201).is_err());
    }
}
