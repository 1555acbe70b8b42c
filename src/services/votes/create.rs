use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::VoteService;
use crate::middlewares::OptionalJWT;
use crate::models::{ApiResponse, ErrorCode, votes::requests::CreateVoteRequest};
use crate::services::error_response;

pub async fn create_vote(
    service: &VoteService,
    data: CreateVoteRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let created_by = OptionalJWT::extract_user_id(request);

    // 日期区间、必填字段、组和课程的存在性都在存储层的同一个事务里检查
    match storage.create_vote(data, created_by).await {
        Ok(vote) => {
            info!(
                "Vote {} created for {} group(s), {} student(s)",
                vote.id,
                vote.groups.len(),
                vote.all_students
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(vote, "Vote created successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::VoteCreationFailed)),
    }
}
