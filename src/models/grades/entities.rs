use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: i32,
}
