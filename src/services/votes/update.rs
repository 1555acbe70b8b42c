use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VoteService;
use crate::models::{ApiResponse, ErrorCode, votes::requests::UpdateVoteRequest};
use crate::services::error_response;

pub async fn update_vote(
    service: &VoteService,
    id: i64,
    data: UpdateVoteRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_vote(id, data).await {
        Ok(Some(vote)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            vote,
            "Vote updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::VoteNotFound,
            "Vote not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::VoteNotFound)),
    }
}
