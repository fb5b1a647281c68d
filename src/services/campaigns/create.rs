use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CampaignService, check_audience, check_audience_ref};
use crate::models::ApiResponse;
use crate::models::campaigns::requests::CreateCampaignRequest;
use crate::services::{branch_scope, finish, invalid};
use crate::utils::validate::{optional_text, require_text};

pub(crate) const BODY_MAX_LEN: usize = 4000;

fn normalize(req: CreateCampaignRequest) -> Result<CreateCampaignRequest, String> {
    let subject = optional_text(req.subject);
    check_audience(req.channel, subject.as_deref(), req.audience, req.audience_ref_id)?;
    Ok(CreateCampaignRequest {
        name: require_text("name", &req.name, 128)?,
        body: require_text("body", &req.body, BODY_MAX_LEN)?,
        subject,
        ..req
    })
}

pub async fn create_campaign(
    service: &CampaignService,
    request: &HttpRequest,
    campaign_data: CreateCampaignRequest,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let campaign_data = normalize(campaign_data).map_err(invalid)?;
        check_audience_ref(
            &storage,
            scope.branch_id,
            campaign_data.audience,
            campaign_data.audience_ref_id,
        )
        .await?;

        let campaign = storage
            .create_campaign(scope.branch_id, campaign_data)
            .await?;
        info!(
            "Campaign {} ({}) drafted for {} via {}",
            campaign.id, campaign.name, campaign.audience, campaign.channel
        );
        Ok(HttpResponse::Created().json(ApiResponse::success(
            campaign,
            "Campaign created successfully",
        )))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::campaigns::entities::{Audience, Channel};

    #[test]
    fn test_normalize_trims_and_checks_audience() {
        let req = CreateCampaignRequest {
            name: " PTM reminder ".to_string(),
            channel: Channel::Email,
            subject: Some(" Parent-teacher meeting ".to_string()),
            body: "Saturday 10am".to_string(),
            audience: Audience::Section,
            audience_ref_id: Some(4),
        };
        let normalized = normalize(req.clone()).unwrap();
        assert_eq!(normalized.name, "PTM reminder");
        assert_eq!(normalized.subject.as_deref(), Some("Parent-teacher meeting"));

        let blank_subject = CreateCampaignRequest {
            subject: Some("  ".to_string()),
            ..req
        };
        assert!(normalize(blank_subject).is_err());
    }
}
