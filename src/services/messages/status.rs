use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{MessageService, message_not_found};
use crate::models::ApiResponse;
use crate::models::messages::requests::UpdateMessageStatusRequest;
use crate::services::{branch_scope, finish};

pub async fn update_status(
    service: &MessageService,
    request: &HttpRequest,
    message_id: i64,
    status_data: UpdateMessageStatusRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage
            .update_message_status(scope.branch_id, message_id, status_data.status)
            .await?
        {
            Some(message) => {
                debug!("Message {} marked {}", message.id, message.status);
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    message,
                    "Message status updated successfully",
                )))
            }
            None => Err(message_not_found()),
        }
    })
    .await
}
