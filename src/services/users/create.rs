use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = user_data.check() {
        return Ok(error_response(&e, ErrorCode::UserNotFound));
    }

    let storage = service.get_storage(request);

    // 用户名、邮箱唯一
    match storage.get_user_by_username(&user_data.username).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e, ErrorCode::UserNotFound)),
    }
    match storage.get_user_by_email(&user_data.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e, ErrorCode::UserNotFound)),
    }

    match storage.create_user(user_data).await {
        Ok(user) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::UserNotFound)),
    }
}
