use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::UpdateUserRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = update_data.check() {
        return Ok(error_response(&e, ErrorCode::UserNotFound));
    }

    let storage = service.get_storage(request);

    // 改名或改邮箱时不能与其他用户冲突
    if let Some(ref username) = update_data.username {
        match storage.get_user_by_username(username).await {
            Ok(Some(other)) if other.id != user_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserAlreadyExists,
                    "Username already exists",
                )));
            }
            Err(e) => return Ok(error_response(&e, ErrorCode::UserNotFound)),
            _ => {}
        }
    }
    if let Some(ref email) = update_data.email {
        match storage.get_user_by_email(email).await {
            Ok(Some(other)) if other.id != user_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserAlreadyExists,
                    "Email already exists",
                )));
            }
            Err(e) => return Ok(error_response(&e, ErrorCode::UserNotFound)),
            _ => {}
        }
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::UserNotFound)),
    }
}
