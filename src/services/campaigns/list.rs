use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CampaignService;
use crate::models::campaigns::requests::CampaignListParams;
use crate::services::{branch_scope, finish, list_response};

pub async fn list_campaigns(
    service: &CampaignService,
    request: &HttpRequest,
    query: CampaignListParams,
) -> ActixResult<HttpResponse> {
    finish(async {
        let scope = branch_scope(request)?;
        let storage = service.get_storage(request)?;

        let page = storage
            .list_campaigns_with_pagination(scope.branch_id, query)
            .await?;
        Ok(list_response(page, "Campaign list retrieved successfully"))
    })
    .await
}
