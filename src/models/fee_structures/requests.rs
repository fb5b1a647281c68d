use super::entities::FeeFrequency;
use crate::models::common::{ListQuery, deserialize_nullable, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/fee.ts")]
pub struct FeeStructureListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub list: ListQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/fee.ts")]
pub struct CreateFeeStructureRequest {
    pub class_id: Option<i64>,
    pub name: String,
    pub amount: f64,
    pub frequency: FeeFrequency,
    pub academic_year: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/fee.ts")]
pub struct UpdateFeeStructureRequest {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub class_id: Option<Option<i64>>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub frequency: Option<FeeFrequency>,
    pub academic_year: Option<String>,
}
