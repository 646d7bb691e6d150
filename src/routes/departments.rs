use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::departments::requests::{
    CreateDepartmentBody, DepartmentQueryParams, UpdateDepartmentBody,
};
use crate::services::DepartmentService;
use crate::utils::SafeDepartmentCode;

// 懒加载的全局 DEPARTMENT_SERVICE 实例
static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

// HTTP处理程序
pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentQueryParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_departments(&req, query.into_inner())
        .await
}

pub async fn create_department(
    req: HttpRequest,
    body: web::Json<CreateDepartmentBody>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(&req, body.into_inner().department)
        .await
}

pub async fn get_department(
    req: HttpRequest,
    code: SafeDepartmentCode,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.get_department(&req, code.0).await
}

pub async fn update_department(
    req: HttpRequest,
    code: SafeDepartmentCode,
    body: web::Json<UpdateDepartmentBody>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(&req, code.0, body.into_inner().department)
        .await
}

pub async fn delete_department(
    req: HttpRequest,
    code: SafeDepartmentCode,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.delete_department(&req, code.0).await
}

// 配置路由
pub fn configure_department_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/department")
            .service(
                web::resource("")
                    .route(web::get().to(list_departments))
                    .route(web::post().to(create_department)),
            )
            .service(
                web::resource("/{department_code}")
                    .route(web::get().to(get_department))
                    .route(web::patch().to(update_department))
                    .route(web::delete().to(delete_department)),
            ),
    );
}
