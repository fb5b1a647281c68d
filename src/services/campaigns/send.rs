use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::info;

use super::{CampaignService, already_sent, campaign_not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{branch_scope, finish, reject};
use crate::storage::CampaignSend;

pub async fn send_campaign(
    service: &CampaignService,
    request: &HttpRequest,
    campaign_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.send_campaign(scope.branch_id, campaign_id).await? {
            CampaignSend::Sent(result) => {
                info!(
                    "Campaign {} sent: {} messages queued, {} students skipped",
                    result.campaign.id, result.queued, result.skipped
                );
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    result,
                    "Campaign sent successfully",
                )))
            }
            CampaignSend::NotFound => Err(campaign_not_found()),
            CampaignSend::AlreadySent => Err(already_sent()),
            CampaignSend::NoRecipients => Err(reject(
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::NoRecipients,
                "No students in the audience have a contact for this channel",
            )),
        }
    })
    .await
}
