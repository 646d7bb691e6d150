use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{DepartmentService, department_not_found};
use crate::models::departments::responses::DepartmentResponse;
use crate::models::{ErrorCode, ErrorResponse};

pub async fn delete_department(
    service: &DepartmentService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let department = match storage.get_department_by_code(&code).await {
        Ok(Some(department)) => department,
        Ok(None) => return Ok(department_not_found()),
        Err(e) => {
            error!("Failed to get department {}: {}", code, e);
            return Ok(internal_error());
        }
    };

    // 课程关联在同一事务内一并删除
    match storage.delete_department(department.id).await {
        Ok(true) => {
            info!("Department {} deleted", code);
            Ok(HttpResponse::Ok().json(DepartmentResponse {
                message: Some("Department deleted successfully".to_string()),
                department: department.view(),
            }))
        }
        Ok(false) => Ok(department_not_found()),
        Err(e) => {
            error!("Failed to delete department {}: {}", code, e);
            Ok(internal_error())
        }
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        ErrorCode::InternalServerError,
        "Failed to delete department",
    ))
}
