use super::entities::UserRole;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{Validate, ValidationReport, validate_email, validate_username};
use serde::Deserialize;
use ts_rs::TS;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

// 用户创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Err(msg) = validate_username(&self.username) {
            report.add("username", msg);
        }
        if let Err(msg) = validate_email(&self.email) {
            report.add("email", msg);
        }
        report
    }
}

// 用户更新请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Some(username) = &self.username
            && let Err(msg) = validate_username(username)
        {
            report.add("username", msg);
        }
        if let Some(email) = &self.email
            && let Err(msg) = validate_email(email)
        {
            report.add("email", msg);
        }
        report
    }
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

impl From<UserListParams> for UserListQuery {
    fn from(params: UserListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            role: params.role,
            search: params.search,
        }
    }
}
