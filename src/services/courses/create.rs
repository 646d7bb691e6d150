use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CourseService, course_exists, reject_self_prerequisite, validation_error};
use crate::errors::SisError;
use crate::models::ErrorCode;
use crate::models::courses::requests::{CreateCourseRequest, NewCourse};
use crate::models::courses::responses::CourseResponse;
use crate::services::integrity::{
    ReferenceKind, dedupe_codes, internal_error_response, resolve_or_reject,
};
use crate::utils::validate::{validate_course_code, validate_credit_hours, validate_localized};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    course.code = course.code.trim().to_string();
    course.departments = dedupe_codes(&course.departments);
    course.prerequisites = dedupe_codes(&course.prerequisites);

    // 所有校验都在写入之前完成
    if let Err(resp) = validate_create_request(&course) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.get_course_by_code(&course.code).await {
        Ok(Some(_)) => return Ok(course_exists(&course.code)),
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check course code {}: {}", course.code, e);
            return Ok(internal_error_response("Failed to create course"));
        }
    }

    let departments =
        match resolve_or_reject(&storage, ReferenceKind::Department, &course.departments).await {
            Ok(resolution) => resolution,
            Err(resp) => return Ok(resp),
        };

    let prerequisites =
        match resolve_or_reject(&storage, ReferenceKind::Course, &course.prerequisites).await {
            Ok(resolution) => resolution,
            Err(resp) => return Ok(resp),
        };

    let code = course.code.clone();
    let created = storage
        .create_course(NewCourse::from(course), departments.ids(), prerequisites.ids())
        .await;

    if let Err(e) = created {
        return Ok(handle_course_create_error(&code, e));
    }
    info!("Course {} created successfully", code);

    match storage.compose_course(&code).await {
        Ok(Some(view)) => Ok(HttpResponse::Created().json(CourseResponse {
            message: Some("Course created successfully".to_string()),
            course: view,
        })),
        Ok(None) => {
            error!("Course {} vanished right after creation", code);
            Ok(internal_error_response("Failed to load created course"))
        }
        Err(e) => {
            error!("Failed to compose course {}: {}", code, e);
            Ok(internal_error_response("Failed to load created course"))
        }
    }
}

fn validate_create_request(course: &CreateCourseRequest) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_course_code(&course.code) {
        return Err(validation_error(ErrorCode::CourseCodeInvalid, msg));
    }

    let checks = [
        validate_localized("name", &course.name),
        validate_localized("description", &course.description),
        validate_credit_hours(course.credit_hours),
    ];
    for check in checks {
        if let Err(msg) = check {
            return Err(validation_error(ErrorCode::ValidationFailed, msg));
        }
    }

    reject_self_prerequisite(&course.code, &course.prerequisites)
}

/// 错误响应辅助函数
fn handle_course_create_error(code: &str, e: SisError) -> HttpResponse {
    // 并发创建同一编码时由唯一索引兜底
    if e.is_duplicate() {
        return course_exists(code);
    }
    error!("Course creation failed: {}", e);
    internal_error_response("Failed to create course")
}
