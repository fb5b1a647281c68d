use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::messages::requests::MessageListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_messages(
    service: &MessageService,
    request: &HttpRequest,
    query: MessageListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_messages_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Message list retrieved successfully"))
    })
    .await
}
