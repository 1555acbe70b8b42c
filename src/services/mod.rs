pub mod courses;
pub mod grades;
pub mod grades_history;
pub mod groups;
pub mod students;
pub mod users;
pub mod votes;

pub use courses::CourseService;
pub use grades::GradeService;
pub use grades_history::GradeHistoryService;
pub use groups::GroupService;
pub use students::StudentService;
pub use users::UserService;
pub use votes::VoteService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::DeaneryError;
use crate::models::{ApiResponse, ErrorCode};

/// 将业务错误转换为统一格式的 HTTP 响应
///
/// `not_found` 为该资源对应的业务错误码（如 `VoteNotFound`）。
pub(crate) fn error_response(err: &DeaneryError, not_found: ErrorCode) -> HttpResponse {
    if !err.is_client_error() {
        #[cfg(debug_assertions)]
        error!("{}", err.format_colored());
        #[cfg(not(debug_assertions))]
        error!("{}", err.format_simple());
    }

    let (status, body) = ApiResponse::from_error(err, not_found);
    HttpResponse::build(status).json(body)
}
