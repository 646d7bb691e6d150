pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentQueryParams, UpdateDepartmentRequest,
};
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
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

    // 获取院系列表
    pub async fn list_departments(
        &self,
        request: &HttpRequest,
        query: DepartmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_departments(self, request, query).await
    }

    pub async fn create_department(
        &self,
        request: &HttpRequest,
        department: CreateDepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, request, department).await
    }

    // 根据院系编码获取院系信息
    pub async fn get_department(
        &self,
        request: &HttpRequest,
        code: String,
    ) -> ActixResult<HttpResponse> {
        get::get_department(self, request, code).await
    }

    // 更新院系信息
    pub async fn update_department(
        &self,
        request: &HttpRequest,
        code: String,
        update: UpdateDepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, request, code, update).await
    }

    // 根据院系编码删除院系
    pub async fn delete_department(
        &self,
        request: &HttpRequest,
        code: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, request, code).await
    }
}

pub(crate) fn department_not_found() -> HttpResponse {
    use crate::models::{ErrorCode, ErrorResponse};

    HttpResponse::NotFound().json(ErrorResponse::new(
        ErrorCode::DepartmentNotFound,
        "Department not found",
    ))
}
