use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CampaignService, already_sent, campaign_not_found, check_audience, check_audience_ref};
use super::create::BODY_MAX_LEN;
use crate::models::ApiResponse;
use crate::models::campaigns::entities::CampaignStatus;
use crate::models::campaigns::requests::UpdateCampaignRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::storage::CampaignWrite;
use crate::utils::validate::{optional_text, require_text};

pub async fn update_campaign(
    service: &CampaignService,
    request: &HttpRequest,
    campaign_id: i64,
    update_data: UpdateCampaignRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let existing = storage
            .get_campaign(scope.branch_id, campaign_id)
            .await?
            .ok_or_else(campaign_not_found)?;
        if existing.status == CampaignStatus::Sent {
            return Err(already_sent());
        }

        let update_data = UpdateCampaignRequest {
            name: update_data
                .name
                .map(|n| require_text("name", &n, 128))
                .transpose()
                .map_err(invalid)?,
            body: update_data
                .body
                .map(|b| require_text("body", &b, BODY_MAX_LEN))
                .transpose()
                .map_err(invalid)?,
            subject: update_data.subject.map(optional_text),
            ..update_data
        };

        // 合并后整体校验
        let channel = update_data.channel.unwrap_or(existing.channel);
        let subject = match &update_data.subject {
            Some(subject) => subject.clone(),
            None => existing.subject.clone(),
        };
        let audience = update_data.audience.unwrap_or(existing.audience);
        let audience_ref_id = update_data.audience_ref_id.unwrap_or(existing.audience_ref_id);
        check_audience(channel, subject.as_deref(), audience, audience_ref_id).map_err(invalid)?;
        check_audience_ref(&storage, scope.branch_id, audience, audience_ref_id).await?;

        match storage
            .update_campaign(scope.branch_id, campaign_id, update_data)
            .await?
        {
            CampaignWrite::Done(campaign) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                campaign,
                "Campaign updated successfully",
            ))),
            CampaignWrite::NotFound => Err(campaign_not_found()),
            CampaignWrite::AlreadySent => Err(already_sent()),
        }
    })
    .await
}
