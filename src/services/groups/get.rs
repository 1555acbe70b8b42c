use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_group(
    service: &GroupService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_group_by_id(id).await {
        Ok(Some(group)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            group,
            "Group retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GroupNotFound,
            "Group not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::GroupNotFound)),
    }
}
