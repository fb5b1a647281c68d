use crate::models::common::{ListQuery, deserialize_nullable};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/branch.ts")]
pub struct BranchListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/branch.ts")]
pub struct CreateBranchRequest {
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/branch.ts")]
pub struct UpdateBranchRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub phone: Option<Option<String>>,
}
