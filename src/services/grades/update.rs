use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::middlewares::OptionalJWT;
use crate::models::{ApiResponse, ErrorCode, grades::requests::UpdateGradeRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn update_grade(
    service: &GradeService,
    id: i64,
    data: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 历史记录必须有修改人
    let Some(user_changed_id) = OptionalJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required to change a grade",
        )));
    };

    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::GradeNotFound));
    }

    let storage = service.get_storage(request);

    match storage.update_grade(id, data, user_changed_id).await {
        Ok(Some(response)) => {
            info!(
                "Grade {} changed to {} by user {}",
                id, response.grade.grade, user_changed_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Grade updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::GradeNotFound)),
    }
}
