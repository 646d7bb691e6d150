use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::DepartmentService;
use crate::models::departments::requests::DepartmentQueryParams;
use crate::models::{ErrorCode, ErrorResponse};

pub async fn list_departments(
    service: &DepartmentService,
    request: &HttpRequest,
    query: DepartmentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_departments_with_pagination(query.pagination.window())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            error!("Failed to list departments: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ErrorResponse::new(
                    ErrorCode::InternalServerError,
                    "Failed to list departments",
                )),
            )
        }
    }
}
