use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::campaigns::requests::{
    CampaignListParams, CreateCampaignRequest, UpdateCampaignRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CampaignService;
use crate::utils::SafeIDI64;

static CAMPAIGN_SERVICE: Lazy<CampaignService> = Lazy::new(CampaignService::new_lazy);

pub async fn list_campaigns(
    req: HttpRequest,
    query: web::Query<CampaignListParams>,
) -> ActixResult<HttpResponse> {
    CAMPAIGN_SERVICE.list_campaigns(&req, query.into_inner()).await
}

pub async fn create_campaign(
    req: HttpRequest,
    campaign_data: web::Json<CreateCampaignRequest>,
) -> ActixResult<HttpResponse> {
    CAMPAIGN_SERVICE
        .create_campaign(&req, campaign_data.into_inner())
        .await
}

pub async fn get_campaign(req: HttpRequest, campaign_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CAMPAIGN_SERVICE.get_campaign(&req, campaign_id.0).await
}

pub async fn update_campaign(
    req: HttpRequest,
    campaign_id: SafeIDI64,
    update_data: web::Json<UpdateCampaignRequest>,
) -> ActixResult<HttpResponse> {
    CAMPAIGN_SERVICE
        .update_campaign(&req, campaign_id.0, update_data.into_inner())
        .await
}

pub async fn delete_campaign(req: HttpRequest, campaign_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CAMPAIGN_SERVICE.delete_campaign(&req, campaign_id.0).await
}

pub async fn send_campaign(req: HttpRequest, campaign_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CAMPAIGN_SERVICE.send_campaign(&req, campaign_id.0).await
}

// 配置路由
pub fn configure_campaigns_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/campaigns")
            .wrap(middlewares::RequireBranch)
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_campaigns))
                    .route(
                        web::post()
                            .to(create_campaign)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            )
            .route(
                "/{id}/send",
                web::post()
                    .to(send_campaign)
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_campaign))
                    .route(
                        web::put()
                            .to(update_campaign)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::patch()
                            .to(update_campaign)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_campaign)
                            .wrap(middlewares::RequireRole::new_any(UserRole::office_roles())),
                    ),
            ),
    );
}
