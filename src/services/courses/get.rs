use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_course(
    service: &CourseService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(id).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::CourseNotFound)),
    }
}
