use super::entities::TenantStatus;
use crate::models::common::ListQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/tenant.ts")]
pub struct TenantListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    pub status: Option<TenantStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/tenant.ts")]
pub struct CreateTenantRequest {
    pub name: String,
    pub code: String,
    pub status: Option<TenantStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/tenant.ts")]
pub struct UpdateTenantRequest {
    pub name: Option<String>,
    pub status: Option<TenantStatus>,
}
