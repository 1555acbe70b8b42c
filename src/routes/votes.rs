use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::votes::requests::{CreateVoteRequest, UpdateVoteRequest, VoteListParams};
use crate::services::VoteService;
use crate::utils::{ListQuery, SafeIDI64};

// 懒加载的全局 VoteService 实例
static VOTE_SERVICE: Lazy<VoteService> = Lazy::new(VoteService::new_lazy);

pub async fn list_votes(
    req: HttpRequest,
    query: ListQuery<VoteListParams>,
) -> ActixResult<HttpResponse> {
    VOTE_SERVICE.list_votes(query.into_inner(), &req).await
}

pub async fn create_vote(
    req: HttpRequest,
    vote_data: web::Json<CreateVoteRequest>,
) -> ActixResult<HttpResponse> {
    VOTE_SERVICE.create_vote(vote_data.into_inner(), &req).await
}

pub async fn get_vote(req: HttpRequest, vote_id: SafeIDI64) -> ActixResult<HttpResponse> {
    VOTE_SERVICE.get_vote(vote_id.0, &req).await
}

pub async fn update_vote(
    req: HttpRequest,
    vote_id: SafeIDI64,
    update_data: web::Json<UpdateVoteRequest>,
) -> ActixResult<HttpResponse> {
    VOTE_SERVICE
        .update_vote(vote_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_vote(req: HttpRequest, vote_id: SafeIDI64) -> ActixResult<HttpResponse> {
    VOTE_SERVICE.delete_vote(vote_id.0, &req).await
}

pub fn configure_votes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/votes")
            .wrap(middlewares::OptionalJWT)
            .route("", web::get().to(list_votes))
            .route("", web::post().to(create_vote))
            .route("/{id}", web::get().to(get_vote))
            .route("/{id}", web::put().to(update_vote))
            .route("/{id}", web::delete().to(delete_vote)),
    );
}
