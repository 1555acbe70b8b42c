use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, pagination::deserialize_optional_string_to_i64};
use crate::utils::validate::{Validate, ValidationReport, validate_grade, validate_not_blank};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListParams {
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
#[ts(export, export_to = "grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub grade: i32,
}

impl Validate for CreateGradeRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Err(msg) = validate_grade(self.grade) {
            report.add("grade", msg);
        }
        report
    }
}

// 修改成绩必须给出原因，同时写入一条历史记录
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct UpdateGradeRequest {
    pub grade: i32,
    pub reason_of_change: String,
}

impl Validate for UpdateGradeRequest {
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
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

impl From<GradeListParams> for GradeListQuery {
    fn from(params: GradeListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            course_id: params.course_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_defaults_to_zero() {
        let req: CreateGradeRequest =
            serde_json::from_str(r#"{"student_id":1,"course_id":2}"#).unwrap();
        assert_eq!(req.grade, 0);
        assert!(req.validate().is_valid());
    }

    #[test]
    fn test_grade_out_of_range() {
        let req: CreateGradeRequest =
            serde_json::from_str(r#"{"student_id":1,"course_id":2,"grade":101}"#).unwrap();
        assert!(req.validate().has_field("grade"));

        let req = UpdateGradeRequest {
            grade: -5,
            reason_of_change: "  ".to_string(),
        };
        let report = req.validate();
        assert!(report.has_field("grade"));
        assert!(report.has_field("reason_of_change"));
    }
}
