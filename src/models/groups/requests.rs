use crate::models::common::PaginationQuery;
use crate::utils::validate::{Validate, ValidationReport, validate_not_blank};
use serde::Deserialize;
use ts_rs::TS;

const MAX_GROUP_NAME_LEN: usize = 64;

fn check_group_name(report: &mut ValidationReport, name: &str) {
    if let Err(msg) = validate_not_blank(name) {
        report.add("name", msg);
    } else if name.chars().count() > MAX_GROUP_NAME_LEN {
        report.add("name", "Group name must be at most 64 characters");
    }
}

// 学术组查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct GroupListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct CreateGroupRequest {
    pub name: String,
}

impl Validate for CreateGroupRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        check_group_name(&mut report, &self.name);
        report
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
}

impl Validate for UpdateGroupRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Some(name) = &self.name {
            check_group_name(&mut report, name);
        }
        report
    }
}

// 存储层查询参数
#[derive(Debug, Clone, Default)]
pub struct GroupListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

impl From<GroupListParams> for GroupListQuery {
    fn from(params: GroupListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
        }
    }
}
