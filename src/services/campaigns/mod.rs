pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod send;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ErrorCode;
use crate::models::campaigns::entities::{Audience, Channel};
use crate::models::campaigns::requests::{
    CampaignListParams, CreateCampaignRequest, UpdateCampaignRequest,
};
use crate::services::references::{require_class, require_section};
use crate::services::{conflict, not_found};
use crate::storage::Storage;

pub struct CampaignService {
    storage: Option<Arc<dyn Storage>>,
}

impl CampaignService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_campaigns(
        &self,
        request: &HttpRequest,
        query: CampaignListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_campaigns(self, request, query).await
    }

    pub async fn create_campaign(
        &self,
        request: &HttpRequest,
        campaign_data: CreateCampaignRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_campaign(self, request, campaign_data).await
    }

    pub async fn get_campaign(
        &self,
        request: &HttpRequest,
        campaign_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_campaign(self, request, campaign_id).await
    }

    pub async fn update_campaign(
        &self,
        request: &HttpRequest,
        campaign_id: i64,
        update_data: UpdateCampaignRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_campaign(self, request, campaign_id, update_data).await
    }

    pub async fn delete_campaign(
        &self,
        request: &HttpRequest,
        campaign_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_campaign(self, request, campaign_id).await
    }

    pub async fn send_campaign(
        &self,
        request: &HttpRequest,
        campaign_id: i64,
    ) -> ActixResult<HttpResponse> {
        send::send_campaign(self, request, campaign_id).await
    }
}

pub(crate) fn campaign_not_found() -> HttpResponse {
    not_found(ErrorCode::CampaignNotFound, "Campaign not found")
}

pub(crate) fn already_sent() -> HttpResponse {
    conflict(
        ErrorCode::CampaignAlreadySent,
        "Campaign has already been sent",
    )
}

/// 邮件须有主题；班级/分组对象须指定 audience_ref_id，全体学生不得指定
pub(crate) fn check_audience(
    channel: Channel,
    subject: Option<&str>,
    audience: Audience,
    audience_ref_id: Option<i64>,
) -> Result<(), &'static str> {
    if channel == Channel::Email && subject.is_none() {
        return Err("subject is required for email campaigns");
    }
    match (audience.requires_ref(), audience_ref_id) {
        (true, None) => Err("audience_ref_id is required for class and section audiences"),
        (false, Some(_)) => Err("audience_ref_id must be empty when targeting all students"),
        _ => Ok(()),
    }
}

/// 引用的班级或分组须属于当前校区
pub(crate) async fn check_audience_ref(
    storage: &Arc<dyn Storage>,
    branch_id: i64,
    audience: Audience,
    audience_ref_id: Option<i64>,
) -> Result<(), HttpResponse> {
    match (audience, audience_ref_id) {
        (Audience::Class, Some(id)) => require_class(storage, branch_id, id).await.map(|_| ()),
        (Audience::Section, Some(id)) => {
            require_section(storage, branch_id, id).await.map(|_| ())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_audience() {
        assert!(check_audience(Channel::Sms, None, Audience::AllStudents, None).is_ok());
        assert!(check_audience(Channel::Email, Some("Fees"), Audience::Class, Some(3)).is_ok());

        assert!(check_audience(Channel::Email, None, Audience::AllStudents, None).is_err());
        assert!(check_audience(Channel::Sms, None, Audience::Section, None).is_err());
        assert!(check_audience(Channel::InApp, None, Audience::AllStudents, Some(1)).is_err());
    }
}
