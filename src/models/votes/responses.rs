use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::PaginationInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "vote.ts")]
pub struct VoteGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "vote.ts")]
pub struct VoteCourse {
    pub id: i64,
    pub name: String,
}

// 投票详情：关联的学术组、必修/选修课程及覆盖的学生数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "vote.ts")]
pub struct VoteDetail {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub groups: Vec<VoteGroup>,
    pub required_courses: Vec<VoteCourse>,
    pub not_required_courses: Vec<VoteCourse>,
    pub all_students: i64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "vote.ts")]
pub struct VoteListResponse {
    pub items: Vec<VoteDetail>,
    pub pagination: PaginationInfo,
}
