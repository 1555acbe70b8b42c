use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn create_course(
    service: &CourseService,
    data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::CourseNotFound));
    }

    let storage = service.get_storage(request);

    match storage.create_course(data).await {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::CourseNotFound)),
    }
}
