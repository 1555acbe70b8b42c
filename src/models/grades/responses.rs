use super::entities::Grade;
use crate::models::common::PaginationInfo;
use crate::models::grades_history::entities::GradeHistory;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
    pub pagination: PaginationInfo,
}

// 修改成绩的结果：新成绩与对应的历史记录
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeUpdateResponse {
    pub grade: Grade,
    pub history: GradeHistory,
}
