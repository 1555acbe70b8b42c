pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest, CourseListParams};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    pub async fn create_course(
        &self,
        data: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, data, request).await
    }

    pub async fn get_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_course(self, id, request).await
    }

    pub async fn update_course(
        &self,
        id: i64,
        data: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, id, data, request).await
    }

    pub async fn delete_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_course(self, id, request).await
    }
}
