use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{CreateGradeRequest, GradeListParams, UpdateGradeRequest};
use crate::models::grades_history::requests::{CreateGradeHistoryRequest, GradeHistoryListParams};
use crate::services::{GradeHistoryService, GradeService};
use crate::utils::SafeIDI64;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);
static GRADE_HISTORY_SERVICE: Lazy<GradeHistoryService> =
    Lazy::new(GradeHistoryService::new_lazy);

// 成绩
pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn create_grade(
    req: HttpRequest,
    grade_data: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(grade_data.into_inner(), &req).await
}

pub async fn get_grade(req: HttpRequest, grade_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(grade_id.0, &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    grade_id: SafeIDI64,
    update_data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(grade_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_grade(req: HttpRequest, grade_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.delete_grade(grade_id.0, &req).await
}

// 成绩变更历史
pub async fn list_grade_history(
    req: HttpRequest,
    query: web::Query<GradeHistoryListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_HISTORY_SERVICE
        .list_grade_history(query.into_inner(), &req)
        .await
}

pub async fn create_grade_history(
    req: HttpRequest,
    history_data: web::Json<CreateGradeHistoryRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_HISTORY_SERVICE
        .create_grade_history(history_data.into_inner(), &req)
        .await
}

pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades-history")
            .wrap(middlewares::OptionalJWT)
            .route("", web::get().to(list_grade_history))
            .route("", web::post().to(create_grade_history)),
    )
    .service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::OptionalJWT)
            .route("", web::get().to(list_grades))
            .route("", web::post().to(create_grade))
            .route("/{id}", web::get().to(get_grade))
            .route("/{id}", web::put().to(update_grade))
            .route("/{id}", web::delete().to(delete_grade)),
    );
}
