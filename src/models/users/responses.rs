use super::entities::User;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}
