use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩变更记录（只追加）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade_history.ts")]
pub struct GradeHistory {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub user_changed_id: i64,
    pub grade: i32,
    pub reason_of_change: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
