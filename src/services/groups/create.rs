use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupService;
use crate::models::{ApiResponse, ErrorCode, groups::requests::CreateGroupRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn create_group(
    service: &GroupService,
    data: CreateGroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::GroupNotFound));
    }

    let storage = service.get_storage(request);

    // 学术组名称唯一
    match storage.get_group_by_name(&data.name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::GroupAlreadyExists,
                "Group name already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e, ErrorCode::GroupNotFound)),
    }

    match storage.create_group(data).await {
        Ok(group) => Ok(
            HttpResponse::Created().json(ApiResponse::success(group, "Group created successfully"))
        ),
        Err(e) => Ok(error_response(&e, ErrorCode::GroupNotFound)),
    }
}
