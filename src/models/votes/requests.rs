use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{SortOrder, VoteOrderColumn};
use crate::errors::Result;
use crate::models::common::{IdList, PaginationQuery};
use crate::utils::RepeatableKeys;
use crate::utils::validate::{Validate, ValidationReport, validate_not_blank};

// 创建投票请求，ID 字段既可以是单个 ID 也可以是列表
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "vote.ts")]
pub struct CreateVoteRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub groups: IdList,
    #[serde(default)]
    pub required_courses: IdList,
    #[serde(default)]
    pub not_required_courses: IdList,
}

impl Validate for CreateVoteRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Err(msg) = validate_not_blank(&self.name) {
            report.add("name", msg);
        }
        if self.groups.is_empty() {
            report.add("groups", "At least one group is required");
        }
        report
    }
}

// 更新投票请求，未出现的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "vote.ts")]
pub struct UpdateVoteRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub groups: Option<IdList>,
    pub required_courses: Option<IdList>,
    pub not_required_courses: Option<IdList>,
}

impl Validate for UpdateVoteRequest {
    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Some(name) = &self.name
            && let Err(msg) = validate_not_blank(name)
        {
            report.add("name", msg);
        }
        if let Some(groups) = &self.groups
            && groups.is_empty()
        {
            report.add("groups", "At least one group is required");
        }
        report
    }
}

// 投票查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "vote.ts")]
pub struct VoteListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub groups: Option<IdList>,
    pub required_courses: Option<IdList>,
    pub not_required_courses: Option<IdList>,
    pub order_by_column: Option<String>,
    pub order_by: Option<String>,
}

impl RepeatableKeys for VoteListParams {
    const REPEATABLE: &'static [&'static str] = &["groups", "required_courses", "not_required_courses"];
}

// 投票列表查询参数（用于存储层），排序列已经过白名单校验
#[derive(Debug, Clone, Default)]
pub struct VoteListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub groups: Option<Vec<i64>>,
    pub required_courses: Option<Vec<i64>>,
    pub not_required_courses: Option<Vec<i64>>,
    pub order_by_column: VoteOrderColumn,
    pub order_by: SortOrder,
}

impl TryFrom<VoteListParams> for VoteListQuery {
    type Error = crate::errors::DeaneryError;

    fn try_from(params: VoteListParams) -> Result<Self> {
        let order_by_column = match params.order_by_column.as_deref() {
            Some(column) => column.parse()?,
            None => VoteOrderColumn::default(),
        };
        let order_by = match params.order_by.as_deref() {
            Some(direction) => direction.parse()?,
            None => SortOrder::default(),
        };

        // 空列表视为未指定该过滤条件
        let non_empty = |ids: Option<IdList>| ids.map(IdList::into_vec).filter(|v| !v.is_empty());

        Ok(Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            name: params.name,
            start_date: params.start_date,
            end_date: params.end_date,
            groups: non_empty(params.groups),
            required_courses: non_empty(params.required_courses),
            not_required_courses: non_empty(params.not_required_courses),
            order_by_column,
            order_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(json: &str) -> VoteListParams {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_list_defaults() {
        let query = VoteListQuery::try_from(params("{}")).unwrap();
        assert_eq!(query.order_by_column, VoteOrderColumn::Id);
        assert_eq!(query.order_by, SortOrder::Asc);
        assert_eq!(query.page, Some(1));
        assert!(query.groups.is_none());
    }

    #[test]
    fn test_list_single_group_becomes_list() {
        let query = VoteListQuery::try_from(params(r#"{"groups":"3"}"#)).unwrap();
        assert_eq!(query.groups, Some(vec![3]));
    }

    #[test]
    fn test_list_repeated_query_keys() {
        let params: VoteListParams = crate::utils::extractor::decode_list_query(
            "page=2&groups=1&groups=2&required_courses%5B%5D=5&required_courses%5B%5D=6",
        )
        .unwrap();
        let query = VoteListQuery::try_from(params).unwrap();
        assert_eq!(query.page, Some(2));
        assert_eq!(query.groups, Some(vec![1, 2]));
        assert_eq!(query.required_courses, Some(vec![5, 6]));
        assert!(query.not_required_courses.is_none());
    }

    #[test]
    fn test_list_rejects_unknown_order() {
        let err = VoteListQuery::try_from(params(r#"{"order_by_column":"groups"}"#)).unwrap_err();
        assert_eq!(err.code(), "E006");

        let err = VoteListQuery::try_from(params(r#"{"order_by":"sideways"}"#)).unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_create_validation() {
        let req: CreateVoteRequest = serde_json::from_str(
            r#"{"name":"","start_date":"2024-01-01","end_date":"2024-01-10"}"#,
        )
        .unwrap();
        let report = req.validate();
        assert!(report.has_field("name"));
        assert!(report.has_field("groups"));
    }

    #[test]
    fn test_create_accepts_scalar_ids() {
        let req: CreateVoteRequest = serde_json::from_str(
            r#"{"name":"Midterm Pick","start_date":"2024-01-01","end_date":"2024-01-10",
                "groups":1,"required_courses":[10],"not_required_courses":"11"}"#,
        )
        .unwrap();
        assert_eq!(req.groups.as_slice(), &[1]);
        assert_eq!(req.required_courses.as_slice(), &[10]);
        assert_eq!(req.not_required_courses.as_slice(), &[11]);
        assert!(req.validate().is_valid());
    }
}
