use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub date_of_birth: NaiveDate,
    pub order_number: String,
    pub edebo_id: String,
    pub is_full_time: bool,
    pub course_ids: Vec<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
