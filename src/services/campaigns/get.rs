use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CampaignService, campaign_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};

pub async fn get_campaign(
    service: &CampaignService,
    request: &HttpRequest,
    campaign_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.get_campaign(scope.branch_id, campaign_id).await? {
            Some(campaign) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                campaign,
                "Campaign retrieved successfully",
            ))),
            None => Err(campaign_not_found()),
        }
    })
    .await
}
