pub mod common;
pub mod courses;
pub mod grades;
pub mod grades_history;
pub mod groups;
pub mod students;
pub mod users;
pub mod votes;

pub use common::{ApiResponse, IdList, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::{Deserialize, Serialize};

// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ValidationFailed = 1006,
    InvalidInput = 1007,

    // 用户
    UserNotFound = 2000,
    UserAlreadyExists = 2001,

    // 学术组
    GroupNotFound = 3000,
    GroupAlreadyExists = 3001,

    // 课程
    CourseNotFound = 4000,

    // 学生
    StudentNotFound = 5000,
    StudentAlreadyExists = 5001,

    // 成绩
    GradeNotFound = 6000,

    // 投票
    VoteNotFound = 7000,
    VoteCreationFailed = 7001,
}
