//! 先修课程接口
//!
//! POST 追加先修课程，已关联的课程返回 409；PATCH 整体替换。
//! 不存在的课程编码返回 422，并在错误信封中列出。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{CourseService, course_not_found, reject_self_prerequisite};
use crate::errors::SisError;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{CourseChanges, PrerequisitesRequest, RelationReplacement};
use crate::models::courses::responses::CourseResponse;
use crate::models::{ErrorCode, ErrorResponse};
use crate::services::integrity::{
    ReferenceKind, Resolution, dedupe_codes, internal_error_response, resolve_and_validate,
};
use crate::storage::Storage;

pub async fn add_prerequisites(
    service: &CourseService,
    request: &HttpRequest,
    code: String,
    body: PrerequisitesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (course, resolution) = match prepare(&storage, &code, &body).await {
        Ok(prepared) => prepared,
        Err(resp) => return Ok(resp),
    };

    let existing = match storage.list_prerequisite_ids(course.id).await {
        Ok(ids) => ids,
        Err(e) => {
            error!("Failed to list prerequisites of {}: {}", code, e);
            return Ok(internal_error_response("Failed to add prerequisites"));
        }
    };

    let already_linked: Vec<String> = resolution
        .resolved
        .iter()
        .filter(|r| existing.contains(&r.id))
        .map(|r| r.code.clone())
        .collect();
    if !already_linked.is_empty() {
        return Ok(prerequisites_already_linked(already_linked));
    }

    if let Err(e) = storage
        .add_course_prerequisites(course.id, resolution.ids())
        .await
    {
        return Ok(handle_add_prerequisites_error(&code, e, &resolution));
    }
    info!("Prerequisites added to course {}", code);

    respond_with_course(&storage, &code, "Prerequisite(s) added successfully").await
}

pub async fn replace_prerequisites(
    service: &CourseService,
    request: &HttpRequest,
    code: String,
    body: PrerequisitesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (course, resolution) = match prepare(&storage, &code, &body).await {
        Ok(prepared) => prepared,
        Err(resp) => return Ok(resp),
    };

    let relations = RelationReplacement {
        department_ids: None,
        prerequisite_ids: Some(resolution.ids()),
    };

    match storage
        .update_course(course.id, CourseChanges::default(), relations)
        .await
    {
        Ok(Some(_)) => info!("Prerequisites of course {} replaced", code),
        Ok(None) => return Ok(course_not_found()),
        Err(e) => {
            error!("Failed to replace prerequisites of {}: {}", code, e);
            return Ok(internal_error_response("Failed to update prerequisites"));
        }
    }

    respond_with_course(&storage, &code, "Prerequisite(s) updated successfully").await
}

/// 查找课程并解析请求中的先修课程编码
async fn prepare(
    storage: &Arc<dyn Storage>,
    code: &str,
    body: &PrerequisitesRequest,
) -> Result<(Course, Resolution), HttpResponse> {
    let course = match storage.get_course_by_code(code).await {
        Ok(Some(course)) => course,
        Ok(None) => return Err(course_not_found()),
        Err(e) => {
            error!("Failed to get course {}: {}", code, e);
            return Err(internal_error_response("Failed to update prerequisites"));
        }
    };

    let prerequisites = dedupe_codes(&body.prerequisites);
    reject_self_prerequisite(code, &prerequisites)?;

    let resolution = resolve_and_validate(storage, ReferenceKind::Course, &prerequisites)
        .await
        .map_err(|e| {
            error!("Failed to resolve prerequisites of {}: {}", code, e);
            internal_error_response("Failed to update prerequisites")
        })?;

    if !resolution.is_complete() {
        return Err(HttpResponse::UnprocessableEntity().json(
            ErrorResponse::new(ErrorCode::PrerequisiteInvalid, "Invalid prerequisite(s)")
                .with_prerequisites(resolution.missing),
        ));
    }

    Ok((course, resolution))
}

fn prerequisites_already_linked(codes: Vec<String>) -> HttpResponse {
    HttpResponse::Conflict().json(
        ErrorResponse::new(
            ErrorCode::PrerequisiteAlreadyLinked,
            "Conflict: Prerequisite(s) already exist",
        )
        .with_prerequisites(codes),
    )
}

fn handle_add_prerequisites_error(
    code: &str,
    e: SisError,
    resolution: &Resolution,
) -> HttpResponse {
    // 并发追加同一先修课程时由唯一索引兜底，无法确定具体冲突项，列出本次请求的编码
    if e.is_duplicate() {
        return prerequisites_already_linked(
            resolution.resolved.iter().map(|r| r.code.clone()).collect(),
        );
    }
    error!("Failed to add prerequisites to {}: {}", code, e);
    internal_error_response("Failed to add prerequisites")
}

async fn respond_with_course(
    storage: &Arc<dyn Storage>,
    code: &str,
    message: &str,
) -> ActixResult<HttpResponse> {
    match storage.compose_course(code).await {
        Ok(Some(view)) => Ok(HttpResponse::Created().json(CourseResponse {
            message: Some(message.to_string()),
            course: view,
        })),
        Ok(None) => Ok(course_not_found()),
        Err(e) => {
            error!("Failed to compose course {}: {}", code, e);
            Ok(internal_error_response("Failed to load course"))
        }
    }
}
