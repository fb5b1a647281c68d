use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::campaigns::entities::Channel;
use crate::models::messages::requests::CreateMessageRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::campaigns::create::BODY_MAX_LEN;
use crate::services::references::require_student;
use crate::services::{bad_reference, branch_scope, finish, invalid};
use crate::utils::validate::{optional_text, require_text};

fn normalize(req: CreateMessageRequest) -> Result<CreateMessageRequest, String> {
    let subject = optional_text(req.subject);
    if req.channel == Channel::Email && subject.is_none() {
        return Err("subject is required for email messages".to_string());
    }
    Ok(CreateMessageRequest {
        body: require_text("body", &req.body, BODY_MAX_LEN)?,
        subject,
        ..req
    })
}

pub async fn create_message(
    service: &MessageService,
    request: &HttpRequest,
    message_data: CreateMessageRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let message_data = normalize(message_data).map_err(invalid)?;
        let student = require_student(&storage, scope.branch_id, message_data.student_id).await?;
        let recipient = student.contact_for(&message_data.channel).ok_or_else(|| {
            bad_reference(
                ErrorCode::NoRecipients,
                format!(
                    "Student {} has no guardian contact for {}",
                    student.id, message_data.channel
                ),
            )
        })?;

        let message = storage
            .create_message(scope.branch_id, recipient, message_data)
            .await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            message,
            "Message queued successfully",
        )))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_requires_subject() {
        let req = CreateMessageRequest {
            student_id: 1,
            channel: Channel::Email,
            subject: None,
            body: "Fee reminder".to_string(),
        };
        assert!(normalize(req.clone()).is_err());

        let sms = CreateMessageRequest {
            channel: Channel::Sms,
            ..req
        };
        assert_eq!(normalize(sms).unwrap().body, "Fee reminder");
    }
}
