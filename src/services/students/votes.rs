use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

// 学生所在学术组参与的投票
pub async fn list_student_votes(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_student_votes(id).await {
        Ok(Some(votes)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            votes,
            "Student votes retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::StudentNotFound)),
    }
}
