use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CourseService, course_not_found, reject_self_prerequisite, validation_error};
use crate::models::ErrorCode;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{CourseChanges, RelationReplacement, UpdateCourseRequest};
use crate::models::courses::responses::CourseResponse;
use crate::services::integrity::{
    ReferenceKind, dedupe_codes, internal_error_response, resolve_or_reject,
};
use crate::utils::validate::{validate_credit_hours, validate_localized_patch};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    code: String,
    mut update: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    update.departments = update.departments.map(|codes| dedupe_codes(&codes));
    update.prerequisites = update.prerequisites.map(|codes| dedupe_codes(&codes));

    if let Err(resp) = validate_update_request(&code, &update) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    let current = match storage.get_course_by_code(&code).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(course_not_found()),
        Err(e) => {
            error!("Failed to get course {}: {}", code, e);
            return Ok(internal_error_response("Failed to update course"));
        }
    };

    // 只有请求中出现的关联才会被校验和替换
    let mut relations = RelationReplacement::default();

    if let Some(ref departments) = update.departments {
        match resolve_or_reject(&storage, ReferenceKind::Department, departments).await {
            Ok(resolution) => relations.department_ids = Some(resolution.ids()),
            Err(resp) => return Ok(resp),
        }
    }

    if let Some(ref prerequisites) = update.prerequisites {
        match resolve_or_reject(&storage, ReferenceKind::Course, prerequisites).await {
            Ok(resolution) => relations.prerequisite_ids = Some(resolution.ids()),
            Err(resp) => return Ok(resp),
        }
    }

    let changes = merge_changes(&current, update);

    match storage.update_course(current.id, changes, relations).await {
        Ok(Some(_)) => info!("Course {} updated", code),
        Ok(None) => return Ok(course_not_found()),
        Err(e) => {
            error!("Failed to update course {}: {}", code, e);
            return Ok(internal_error_response("Failed to update course"));
        }
    }

    match storage.compose_course(&code).await {
        Ok(Some(view)) => Ok(HttpResponse::Ok().json(CourseResponse {
            message: Some("Course updated successfully".to_string()),
            course: view,
        })),
        Ok(None) => Ok(course_not_found()),
        Err(e) => {
            error!("Failed to compose course {}: {}", code, e);
            Ok(internal_error_response("Failed to load updated course"))
        }
    }
}

fn validate_update_request(code: &str, update: &UpdateCourseRequest) -> Result<(), HttpResponse> {
    // 课程编码不支持修改
    if let Some(ref new_code) = update.code
        && new_code.trim() != code
    {
        return Err(validation_error(
            ErrorCode::CourseUpdateConflict,
            format!("Course code cannot be changed from '{code}' to '{}'", new_code.trim()),
        ));
    }

    if let Some(ref name) = update.name
        && let Err(msg) = validate_localized_patch("name", name)
    {
        return Err(validation_error(ErrorCode::ValidationFailed, msg));
    }

    if let Some(ref description) = update.description
        && let Err(msg) = validate_localized_patch("description", description)
    {
        return Err(validation_error(ErrorCode::ValidationFailed, msg));
    }

    if let Some(credit_hours) = update.credit_hours
        && let Err(msg) = validate_credit_hours(credit_hours)
    {
        return Err(validation_error(ErrorCode::ValidationFailed, msg));
    }

    if let Some(ref prerequisites) = update.prerequisites {
        reject_self_prerequisite(code, prerequisites)?;
    }

    Ok(())
}

/// 将部分更新合并到当前课程上，双语字段按语言键合并
fn merge_changes(current: &Course, update: UpdateCourseRequest) -> CourseChanges {
    CourseChanges {
        name: update.name.map(|patch| current.name.merged(&patch)),
        description: update
            .description
            .map(|patch| current.description.merged(&patch)),
        credit_hours: update.credit_hours,
        course_type: update.course_type,
    }
}
