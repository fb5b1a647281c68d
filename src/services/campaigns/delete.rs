use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CampaignService, already_sent, campaign_not_found};
use crate::models::ApiResponse;
use crate::services::{branch_scope, finish};
use crate::storage::CampaignWrite;

pub async fn delete_campaign(
    service: &CampaignService,
    request: &HttpRequest,
    campaign_id: i64,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        match storage.delete_campaign(scope.branch_id, campaign_id).await? {
            CampaignWrite::Done(()) => Ok(HttpResponse::Ok().json(
                ApiResponse::<()>::success_empty("Campaign deleted successfully"),
            )),
            CampaignWrite::NotFound => Err(campaign_not_found()),
            CampaignWrite::AlreadySent => Err(already_sent()),
        }
    })
    .await
}
