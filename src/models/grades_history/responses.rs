use super::entities::GradeHistory;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade_history.ts")]
pub struct GradeHistoryListResponse {
    pub items: Vec<GradeHistory>,
    pub pagination: PaginationInfo,
}
