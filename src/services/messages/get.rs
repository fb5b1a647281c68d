use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MessageService, message_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_message(
    service: &MessageService,
    request: &HttpRequest,
    message_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_message(scope.branch_id, message_id).await? {
            Some(message) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                message,
                "Message retrieved successfully",
            ))),
            None => Err(message_not_found()),
        }
    })
    .await
}
