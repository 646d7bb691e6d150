use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::PageWindow;
use crate::models::courses::requests::{CourseListQuery, CourseQueryParams};
use crate::services::integrity::internal_error_response;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let department = query
        .department
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty());

    let list_query = CourseListQuery {
        window: query.pagination.window(),
        department,
    };

    fetch_courses(service, request, list_query).await
}

pub async fn list_all_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let list_query = CourseListQuery {
        window: PageWindow::unbounded(),
        department: None,
    };

    fetch_courses(service, request, list_query).await
}

async fn fetch_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.compose_course_list(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            error!("Failed to list courses: {}", e);
            Ok(internal_error_response("Failed to list courses"))
        }
    }
}
