use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeHistoryService;
use crate::models::{ApiResponse, ErrorCode, grades_history::requests::CreateGradeHistoryRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn create_grade_history(
    service: &GradeHistoryService,
    data: CreateGradeHistoryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::NotFound));
    }

    let storage = service.get_storage(request);

    match storage.create_grade_history(data).await {
        Ok(history) => Ok(HttpResponse::Created().json(ApiResponse::success(
            history,
            "Grade history recorded successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::NotFound)),
    }
}
