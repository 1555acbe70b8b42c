use crate::models::common::PaginationQuery;
use crate::utils::validate::{Validate, ValidationReport, validate_not_blank};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CreateCourseRequest {
    pub name: String,
}

impl Validate for CreateCourseRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Err(msg) = validate_not_blank(&self.name) {
            report.add("name", msg);
        }
        report
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
}

impl Validate for UpdateCourseRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Some(name) = &self.name
            && let Err(msg) = validate_not_blank(name)
        {
            report.add("name", msg);
        }
        report
    }
}

#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

impl From<CourseListParams> for CourseListQuery {
    fn from(params: CourseListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
        }
    }
}
