pub mod create;
pub mod get;
pub mod list;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::messages::requests::{
    CreateMessageRequest, MessageListParams, UpdateMessageStatusRequest,
};
use crate::services::not_found;
use crate::storage::Storage;

pub struct MessageService {
    storage: Option<Arc<dyn Storage>>,
}

impl MessageService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_messages(
        &self,
        request: &HttpRequest,
        query: MessageListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_messages(self, request, query).await
    }

    pub async fn create_message(
        &self,
        request: &HttpRequest,
        message_data: CreateMessageRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_message(self, request, message_data).await
    }

    pub async fn get_message(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_message(self, request, message_id).await
    }

    pub async fn update_status(
        &self,
        request: &HttpRequest,
        message_id: i64,
        status_data: UpdateMessageStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_status(self, request, message_id, status_data).await
    }
}

pub(crate) fn message_not_found() -> HttpResponse {
    not_found(ErrorCode::MessageNotFound, "Message not found")
}
