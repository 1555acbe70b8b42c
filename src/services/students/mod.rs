pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod votes;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn create_student(
        &self,
        data: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, data, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_student(self, id, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        data: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, data, request).await
    }

    pub async fn delete_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }

    // 学生所在学术组参与的投票
    pub async fn list_student_votes(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        votes::list_student_votes(self, id, request).await
    }
}
