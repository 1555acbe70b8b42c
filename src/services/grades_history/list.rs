use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeHistoryService;
use crate::models::{ApiResponse, ErrorCode, grades_history::requests::GradeHistoryListParams};
use crate::services::error_response;

pub async fn list_grade_history(
    service: &GradeHistoryService,
    query: GradeHistoryListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_grade_history_with_pagination(query.into())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grade history retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::NotFound)),
    }
}
