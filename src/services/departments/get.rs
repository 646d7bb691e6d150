use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{DepartmentService, department_not_found};
use crate::models::departments::responses::DepartmentResponse;
use crate::models::{ErrorCode, ErrorResponse};

pub async fn get_department(
    service: &DepartmentService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_department_by_code(&code).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(DepartmentResponse {
            message: None,
            department: department.view(),
        })),
        Ok(None) => Ok(department_not_found()),
        Err(e) => {
            error!("Failed to get department {}: {}", code, e);
            Ok(
                HttpResponse::InternalServerError().json(ErrorResponse::new(
                    ErrorCode::InternalServerError,
                    "Failed to get department information",
                )),
            )
        }
    }
}
