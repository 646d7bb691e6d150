use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CourseService, course_not_found};
use crate::models::courses::responses::CourseResponse;
use crate::services::integrity::internal_error_response;

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let course = match storage.get_course_by_code(&code).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(course_not_found()),
        Err(e) => {
            error!("Failed to get course {}: {}", code, e);
            return Ok(internal_error_response("Failed to delete course"));
        }
    };

    // 删除前保留完整视图作为响应
    let snapshot = match storage.compose_course(&code).await {
        Ok(Some(view)) => view,
        Ok(None) => return Ok(course_not_found()),
        Err(e) => {
            error!("Failed to compose course {}: {}", code, e);
            return Ok(internal_error_response("Failed to delete course"));
        }
    };

    match storage.delete_course(course.id).await {
        Ok(true) => {
            info!("Course {} deleted", code);
            Ok(HttpResponse::Ok().json(CourseResponse {
                message: Some("Course deleted successfully".to_string()),
                course: snapshot,
            }))
        }
        Ok(false) => Ok(course_not_found()),
        Err(e) => {
            error!("Failed to delete course {}: {}", code, e);
            Ok(internal_error_response("Failed to delete course"))
        }
    }
}
