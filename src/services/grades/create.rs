use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode, grades::requests::CreateGradeRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn create_grade(
    service: &GradeService,
    data: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::GradeNotFound));
    }

    let storage = service.get_storage(request);

    match storage.create_grade(data).await {
        Ok(grade) => Ok(
            HttpResponse::Created().json(ApiResponse::success(grade, "Grade created successfully"))
        ),
        Err(e) => Ok(error_response(&e, ErrorCode::NotFound)),
    }
}
