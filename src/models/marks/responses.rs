use serde::Serialize;
use ts_rs::TS;

use super::entities::Mark;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/mark.ts")]
pub struct BulkMarksResponse {
    pub exam_id: i64,
    pub created: i64,
    pub updated: i64,
    pub items: Vec<Mark>,
}
