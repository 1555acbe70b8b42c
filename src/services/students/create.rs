use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::services::error_response;
use crate::utils::validate::Validate;

pub async fn create_student(
    service: &StudentService,
    data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = data.check() {
        return Ok(error_response(&e, ErrorCode::StudentNotFound));
    }

    let storage = service.get_storage(request);

    // 学术组、用户、课程的存在性以及一人一档在存储层事务内检查
    match storage.create_student(data).await {
        Ok(student) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(student, "Student created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::StudentNotFound)),
    }
}
