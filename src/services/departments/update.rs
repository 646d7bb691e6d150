use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::create::department_exists;
use super::{DepartmentService, department_not_found};
use crate::models::departments::entities::Department;
use crate::models::departments::requests::{DepartmentChanges, UpdateDepartmentRequest};
use crate::models::departments::responses::DepartmentResponse;
use crate::models::{ErrorCode, ErrorResponse};
use crate::utils::validate::{
    validate_capacity, validate_department_code, validate_localized_patch,
};

pub async fn update_department(
    service: &DepartmentService,
    request: &HttpRequest,
    code: String,
    update: UpdateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = validate_update_request(&update) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    let current = match storage.get_department_by_code(&code).await {
        Ok(Some(department)) => department,
        Ok(None) => return Ok(department_not_found()),
        Err(e) => {
            error!("Failed to get department {}: {}", code, e);
            return Ok(internal_error());
        }
    };

    let changes = merge_changes(&current, update);

    // 改名时检查新编码是否已被占用
    if let Some(ref new_code) = changes.code {
        match storage.get_department_by_code(new_code).await {
            Ok(Some(_)) => return Ok(department_exists(new_code)),
            Ok(None) => {}
            Err(e) => {
                error!("Failed to check department code {}: {}", new_code, e);
                return Ok(internal_error());
            }
        }
    }

    let renamed_to = changes.code.clone();
    match storage.update_department(current.id, changes).await {
        Ok(Some(updated)) => {
            info!("Department {} updated", updated.code);
            Ok(HttpResponse::Ok().json(DepartmentResponse {
                message: Some("Department updated successfully".to_string()),
                department: updated.view(),
            }))
        }
        Ok(None) => Ok(department_not_found()),
        Err(e) if e.is_duplicate() => Ok(department_exists(
            renamed_to.as_deref().unwrap_or(&current.code),
        )),
        Err(e) => {
            error!("Failed to update department {}: {}", code, e);
            Ok(internal_error())
        }
    }
}

fn validate_update_request(update: &UpdateDepartmentRequest) -> Result<(), HttpResponse> {
    if let Some(ref code) = update.code
        && let Err(msg) = validate_department_code(code.trim())
    {
        return Err(HttpResponse::BadRequest().json(ErrorResponse::new(
            ErrorCode::DepartmentCodeInvalid,
            msg,
        )));
    }

    if let Some(ref name) = update.name
        && let Err(msg) = validate_localized_patch("name", name)
    {
        return Err(
            HttpResponse::BadRequest().json(ErrorResponse::new(ErrorCode::ValidationFailed, msg)),
        );
    }

    if let Some(capacity) = update.capacity
        && let Err(msg) = validate_capacity(capacity)
    {
        return Err(
            HttpResponse::BadRequest().json(ErrorResponse::new(ErrorCode::ValidationFailed, msg)),
        );
    }

    Ok(())
}

/// 将部分更新合并到当前记录上，双语字段按语言键合并
fn merge_changes(current: &Department, update: UpdateDepartmentRequest) -> DepartmentChanges {
    DepartmentChanges {
        code: update
            .code
            .map(|code| code.trim().to_string())
            .filter(|code| *code != current.code),
        name: update.name.map(|patch| current.name.merged(&patch)),
        capacity: update.capacity,
        program: update.program,
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        ErrorCode::InternalServerError,
        "Failed to update department",
    ))
}
