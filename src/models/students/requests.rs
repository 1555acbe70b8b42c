use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{IdList, PaginationQuery, pagination::deserialize_optional_string_to_i64};
use crate::utils::validate::{Validate, ValidationReport, validate_edebo_id, validate_order_number};

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    #[ts(optional)]
    pub group_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    #[ts(optional)]
    pub course_id: Option<i64>,
    // 按 edebo_id / order_number 模糊搜索
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    pub group_id: i64,
    pub user_id: i64,
    pub date_of_birth: NaiveDate,
    pub order_number: String,
    pub edebo_id: String,
    #[serde(default = "default_full_time")]
    pub is_full_time: bool,
    #[serde(default)]
    pub course_ids: IdList,
}

fn default_full_time() -> bool {
    true
}

impl Validate for CreateStudentRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Err(msg) = validate_order_number(&self.order_number) {
            report.add("order_number", msg);
        }
        if let Err(msg) = validate_edebo_id(&self.edebo_id) {
            report.add("edebo_id", msg);
        }
        report
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub group_id: Option<i64>,
    pub user_id: Option<i64>,
    pub date_of_birth: Option<NaiveDate>,
    pub order_number: Option<String>,
    pub edebo_id: Option<String>,
    pub is_full_time: Option<bool>,
    // 出现时整体替换课程集合
    pub course_ids: Option<IdList>,
}

impl Validate for UpdateStudentRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Some(order_number) = &self.order_number
            && let Err(msg) = validate_order_number(order_number)
        {
            report.add("order_number", msg);
        }
        if let Some(edebo_id) = &self.edebo_id
            && let Err(msg) = validate_edebo_id(edebo_id)
        {
            report.add("edebo_id", msg);
        }
        report
    }
}

// 存储层查询参数
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub group_id: Option<i64>,
    pub course_id: Option<i64>,
    pub search: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            group_id: params.group_id,
            course_id: params.course_id,
            search: params.search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateStudentRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let req = request(
            r#"{"group_id":1,"user_id":2,"date_of_birth":"2003-05-17","order_number":"A-1","edebo_id":"12345678"}"#,
        );
        assert!(req.is_full_time);
        assert!(req.course_ids.is_empty());
        assert!(req.validate().is_valid());
    }

    #[test]
    fn test_create_reports_every_bad_field() {
        let req = request(
            r#"{"group_id":1,"user_id":2,"date_of_birth":"2003-05-17","order_number":"","edebo_id":"12"}"#,
        );
        let report = req.validate();
        assert!(report.has_field("order_number"));
        assert!(report.has_field("edebo_id"));
    }

    #[test]
    fn test_bad_date_of_birth_is_rejected() {
        let parsed = serde_json::from_str::<CreateStudentRequest>(
            r#"{"group_id":1,"user_id":2,"date_of_birth":"17.05.2003","order_number":"A","edebo_id":"12345678"}"#,
        );
        assert!(parsed.is_err());
    }
}
