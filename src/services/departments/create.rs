use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::DepartmentService;
use crate::errors::SisError;
use crate::models::departments::requests::CreateDepartmentRequest;
use crate::models::departments::responses::DepartmentResponse;
use crate::models::{ErrorCode, ErrorResponse};
use crate::utils::validate::{validate_capacity, validate_department_code, validate_localized};

pub async fn create_department(
    service: &DepartmentService,
    request: &HttpRequest,
    mut department: CreateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    department.code = department.code.trim().to_string();

    if let Err(resp) = validate_create_request(&department) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    // 编码唯一性预检，唯一索引兜底并发创建
    match storage.get_department_by_code(&department.code).await {
        Ok(Some(_)) => return Ok(department_exists(&department.code)),
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check department code {}: {}", department.code, e);
            return Ok(internal_error("Failed to create department"));
        }
    }

    let code = department.code.clone();
    match storage.create_department(department).await {
        Ok(created) => {
            info!("Department {} created successfully", created.code);
            Ok(HttpResponse::Created().json(DepartmentResponse {
                message: Some("Department created successfully".to_string()),
                department: created.view(),
            }))
        }
        Err(e) => Ok(handle_department_create_error(&code, e)),
    }
}

fn validate_create_request(department: &CreateDepartmentRequest) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_department_code(&department.code) {
        return Err(HttpResponse::BadRequest().json(ErrorResponse::new(
            ErrorCode::DepartmentCodeInvalid,
            msg,
        )));
    }

    let checks = [
        validate_localized("name", &department.name),
        validate_capacity(department.capacity).map_err(str::to_string),
    ];
    for check in checks {
        if let Err(msg) = check {
            return Err(HttpResponse::BadRequest()
                .json(ErrorResponse::new(ErrorCode::ValidationFailed, msg)));
        }
    }

    Ok(())
}

pub(super) fn department_exists(code: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        ErrorCode::DepartmentAlreadyExists,
        format!("Department with code '{code}' already exists"),
    ))
}

fn internal_error(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ErrorResponse::new(ErrorCode::InternalServerError, message))
}

/// 错误响应辅助函数
fn handle_department_create_error(code: &str, e: SisError) -> HttpResponse {
    if e.is_duplicate() {
        return department_exists(code);
    }
    error!("Department creation failed: {}", e);
    internal_error("Failed to create department")
}
