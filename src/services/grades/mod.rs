pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{CreateGradeRequest, GradeListParams, UpdateGradeRequest};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    pub async fn list_grades(
        &self,
        query: GradeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, query, request).await
    }

    pub async fn create_grade(
        &self,
        data: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, data, request).await
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_grade(self, id, request).await
    }

    // 修改成绩（需要已认证的调用方作为修改人）
    pub async fn update_grade(
        &self,
        id: i64,
        data: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, id, data, request).await
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, id, request).await
    }
}
