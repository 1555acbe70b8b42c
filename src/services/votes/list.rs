use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VoteService;
use crate::models::{
    ApiResponse, ErrorCode,
    votes::requests::{VoteListParams, VoteListQuery},
};
use crate::services::error_response;

pub async fn list_votes(
    service: &VoteService,
    query: VoteListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 排序列和方向不在白名单内时直接拒绝，不访问存储
    let query = match VoteListQuery::try_from(query) {
        Ok(query) => query,
        Err(e) => return Ok(error_response(&e, ErrorCode::VoteNotFound)),
    };

    let storage = service.get_storage(request);

    match storage.list_votes_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Vote list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::VoteNotFound)),
    }
}
