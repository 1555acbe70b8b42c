use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, pagination::deserialize_optional_string_to_i64};
use crate::utils::validate::{Validate, ValidationReport, validate_grade, validate_not_blank};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grade_history.ts")]
pub struct GradeHistoryListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    #[ts(optional)]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    #[ts(optional)]
    pub course_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade_history.ts")]
pub struct CreateGradeHistoryRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub user_changed_id: i64,
    pub grade: i32,
    pub reason_of_change: String,
}

impl Validate for CreateGradeHistoryRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Err(msg) = validate_grade(self.grade) {
            report.add("grade", msg);
        }
        if let Err(msg) = validate_not_blank(&self.reason_of_change) {
            report.add("reason_of_change", msg);
        }
        report
    }
}

#[derive(Debug, Clone, Default)]
pub struct GradeHistoryListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

impl From<GradeHistoryListParams> for GradeHistoryListQuery {
    fn from(params: GradeHistoryListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            course_id: params.course_id,
        }
    }
}
