use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::groups::requests::{CreateGroupRequest, GroupListParams, UpdateGroupRequest};
use crate::services::GroupService;
use crate::utils::SafeIDI64;

static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

pub async fn list_groups(
    req: HttpRequest,
    query: web::Query<GroupListParams>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(query.into_inner(), &req).await
}

pub async fn create_group(
    req: HttpRequest,
    group_data: web::Json<CreateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.create_group(group_data.into_inner(), &req).await
}

pub async fn get_group(req: HttpRequest, group_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.get_group(group_id.0, &req).await
}

pub async fn update_group(
    req: HttpRequest,
    group_id: SafeIDI64,
    update_data: web::Json<UpdateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .update_group(group_id.0, update_data.into_inner(), &req)
        .await
}

// 删除学术组会连带删除组内学生
pub async fn delete_group(req: HttpRequest, group_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.delete_group(group_id.0, &req).await
}

pub fn configure_groups_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/groups")
            .wrap(middlewares::OptionalJWT)
            .route("", web::get().to(list_groups))
            .route("", web::post().to(create_group))
            .route("/{id}", web::get().to(get_group))
            .route("/{id}", web::put().to(update_group))
            .route("/{id}", web::delete().to(delete_group)),
    );
}
