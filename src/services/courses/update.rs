use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn update_course(
    service: &CourseService,
    id: i64,
    data: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::CourseNotFound));
    }

    let storage = service.get_storage(request);

    match storage.update_course(id, data).await {
        Ok(Some(course)) => Ok(
            HttpResponse::Ok().json(ApiResponse::success(course, "Course updated successfully"))
        ),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::CourseNotFound)),
    }
}
