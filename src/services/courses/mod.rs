pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod prerequisites;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, PrerequisitesRequest, UpdateCourseRequest,
};
use crate::models::{ErrorCode, ErrorResponse};
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

    // 分页获取课程列表
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    // 获取全部课程
    pub async fn list_all_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_all_courses(self, request).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course).await
    }

    // 根据课程编码获取课程
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        code: String,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, code).await
    }

    // 更新课程信息
    pub async fn update_course(
        &self,
        request: &HttpRequest,
        code: String,
        update: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, code, update).await
    }

    // 根据课程编码删除课程
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        code: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, code).await
    }

    // 追加先修课程
    pub async fn add_prerequisites(
        &self,
        request: &HttpRequest,
        code: String,
        body: PrerequisitesRequest,
    ) -> ActixResult<HttpResponse> {
        prerequisites::add_prerequisites(self, request, code, body).await
    }

    // 整体替换先修课程
    pub async fn replace_prerequisites(
        &self,
        request: &HttpRequest,
        code: String,
        body: PrerequisitesRequest,
    ) -> ActixResult<HttpResponse> {
        prerequisites::replace_prerequisites(self, request, code, body).await
    }
}

pub(crate) fn course_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        ErrorCode::CourseNotFound,
        "Course not found",
    ))
}

pub(crate) fn course_exists(code: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        ErrorCode::CourseAlreadyExists,
        format!("Course with code '{code}' already exists"),
    ))
}

/// 课程不能把自己列为先修课程
pub(crate) fn reject_self_prerequisite(
    code: &str,
    prerequisites: &[String],
) -> Result<(), HttpResponse> {
    if prerequisites.iter().any(|p| p == code) {
        return Err(validation_error(
            ErrorCode::CourseSelfPrerequisite,
            format!("Course '{code}' cannot be its own prerequisite"),
        ));
    }
    Ok(())
}

pub(crate) fn validation_error(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(code, message))
}
