use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{CourseService, course_not_found};
use crate::models::courses::responses::CourseResponse;
use crate::services::integrity::internal_error_response;

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.compose_course(&code).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(CourseResponse {
            message: None,
            course,
        })),
        Ok(None) => Ok(course_not_found()),
        Err(e) => {
            error!("Failed to get course {}: {}", code, e);
            Ok(internal_error_response("Failed to get course information"))
        }
    }
}
