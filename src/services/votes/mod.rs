pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::votes::requests::{CreateVoteRequest, UpdateVoteRequest, VoteListParams};
use crate::storage::Storage;

pub struct VoteService {
    storage: Option<Arc<dyn Storage>>,
}

impl VoteService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 投票列表（过滤 + 排序 + 分页）
    pub async fn list_votes(
        &self,
        query: VoteListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_votes(self, query, request).await
    }

    // 创建投票，调用方（如有）记为创建人
    pub async fn create_vote(
        &self,
        data: CreateVoteRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_vote(self, data, request).await
    }

    pub async fn get_vote(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_vote(self, id, request).await
    }

    pub async fn update_vote(
        &self,
        id: i64,
        data: UpdateVoteRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_vote(self, id, data, request).await
    }

    pub async fn delete_vote(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_vote(self, id, request).await
    }
}
