use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VoteService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_vote(
    service: &VoteService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_vote_by_id(id).await {
        Ok(Some(vote)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            vote,
            "Vote retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::VoteNotFound,
            "Vote not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::VoteNotFound)),
    }
}
