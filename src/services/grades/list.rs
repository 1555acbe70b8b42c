use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode, grades::requests::GradeListParams};
use crate::services::error_response;

pub async fn list_grades(
    service: &GradeService,
    query: GradeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grades_with_pagination(query.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grade list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::GradeNotFound)),
    }
}
