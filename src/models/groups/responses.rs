use super::entities::Group;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct GroupListResponse {
    pub items: Vec<Group>,
    pub pagination: PaginationInfo,
}
