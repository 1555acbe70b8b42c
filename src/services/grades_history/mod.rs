pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades_history::requests::{CreateGradeHistoryRequest, GradeHistoryListParams};
use crate::storage::Storage;

// 成绩变更历史只追加，不提供修改和删除
pub struct GradeHistoryService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeHistoryService {
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

    pub async fn create_grade_history(
        &self,
        data: CreateGradeHistoryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade_history(self, data, request).await
    }

    pub async fn list_grade_history(
        &self,
        query: GradeHistoryListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grade_history(self, query, request).await
    }
}
