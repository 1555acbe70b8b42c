use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn update_student(
    service: &StudentService,
    id: i64,
    data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::StudentNotFound));
    }

    let storage = service.get_storage(request);

    match storage.update_student(id, data).await {
        Ok(Some(student)) => Ok(
            HttpResponse::Ok().json(ApiResponse::success(student, "Student updated successfully"))
        ),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::StudentNotFound)),
    }
}
