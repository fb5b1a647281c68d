use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::messages::requests::{
    CreateMessageRequest, MessageListParams, UpdateMessageStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::MessageService;
use crate::utils::SafeIDI64;

static MESSAGE_SERVICE: Lazy<MessageService> = Lazy::new(MessageService::new_lazy);

pub async fn list_messages(
    req: HttpRequest,
    query: web::Query<MessageListParams>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.list_messages(&req, query.into_inner()).await
}

pub async fn create_message(
    req: HttpRequest,
    message_data: web::Json<CreateMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .create_message(&req, message_data.into_inner())
        .await
}

pub async fn get_message(req: HttpRequest, message_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.get_message(&req, message_id.0).await
}

pub async fn update_status(
    req: HttpRequest,
    message_id: SafeIDI64,
    status_data: web::Json<UpdateMessageStatusRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .update_status(&req, message_id.0, status_data.into_inner())
        .await
}

// 消息只读，投递状态由发送通道回写
pub fn configure_messages_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/messages")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::get().to(get_message))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route("", web::get().to(list_messages))
                    .route("", web::post().to(create_message))
                    .route("/{id}/status", web::patch().to(update_status)),
            ),
    );
}
