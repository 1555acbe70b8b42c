use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupService;
use crate::models::{ApiResponse, ErrorCode, groups::requests::UpdateGroupRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn update_group(
    service: &GroupService,
    id: i64,
    data: UpdateGroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::GroupNotFound));
    }

    let storage = service.get_storage(request);

    if let Some(ref name) = data.name {
        match storage.get_group_by_name(name).await {
            Ok(Some(other)) if other.id != id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::GroupAlreadyExists,
                    "Group name already exists",
                )));
            }
            Err(e) => return Ok(error_response(&e, ErrorCode::GroupNotFound)),
            _ => {}
        }
    }

    match storage.update_group(id, data).await {
        Ok(Some(group)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(group, "Group updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GroupNotFound,
            "Group not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::GroupNotFound)),
    }
}
