//! 引用完整性检查
//!
//! 写入前把请求中的自然键批量解析为内部 ID，并找出不存在的编码。
//! 只读，无副作用。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::Result;
use crate::models::{ErrorCode, ErrorResponse};
use crate::storage::{EntityRef, Storage};

/// 被引用实体的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Department,
    Course,
}

/// 解析结果：resolved 与 missing 都保持请求中的顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub resolved: Vec<EntityRef>,
    pub missing: Vec<String>,
}

impl Resolution {
    pub fn ids(&self) -> Vec<i64> {
        self.resolved.iter().map(|r| r.id).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// 去除首尾空白与重复编码，保留首次出现的位置
pub fn dedupe_codes(codes: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| seen.insert(*code))
        .map(str::to_string)
        .collect()
}

/// 将请求编码划分为已找到和缺失两部分
pub fn partition(codes: &[String], found: Vec<EntityRef>) -> Resolution {
    let mut by_code: HashMap<String, EntityRef> =
        found.into_iter().map(|r| (r.code.clone(), r)).collect();

    let mut resolution = Resolution::default();
    for code in dedupe_codes(codes) {
        match by_code.remove(&code) {
            Some(entity) => resolution.resolved.push(entity),
            None => resolution.missing.push(code),
        }
    }
    resolution
}

/// 一次批量查询解析全部编码
pub async fn resolve_and_validate(
    storage: &Arc<dyn Storage>,
    kind: ReferenceKind,
    codes: &[String],
) -> Result<Resolution> {
    let unique = dedupe_codes(codes);
    if unique.is_empty() {
        return Ok(Resolution::default());
    }

    let found = match kind {
        ReferenceKind::Department => storage.find_departments_by_codes(&unique).await?,
        ReferenceKind::Course => storage.find_courses_by_codes(&unique).await?,
    };

    Ok(partition(&unique, found))
}

/// 解析编码，存在缺失时返回列出缺失编码的 400 响应
pub async fn resolve_or_reject(
    storage: &Arc<dyn Storage>,
    kind: ReferenceKind,
    codes: &[String],
) -> std::result::Result<Resolution, HttpResponse> {
    let resolution = resolve_and_validate(storage, kind, codes)
        .await
        .map_err(|e| {
            error!("Failed to resolve {:?} references: {}", kind, e);
            internal_error_response("Failed to resolve referenced codes")
        })?;

    if !resolution.is_complete() {
        return Err(missing_references_response(kind, resolution.missing));
    }

    Ok(resolution)
}

/// 缺失引用的 400 响应，错误信封中列出缺失的编码
pub fn missing_references_response(kind: ReferenceKind, missing: Vec<String>) -> HttpResponse {
    let body = match kind {
        ReferenceKind::Department => ErrorResponse::new(
            ErrorCode::CourseReferenceMissing,
            "Some departments do not exist",
        )
        .with_departments(missing),
        ReferenceKind::Course => ErrorResponse::new(
            ErrorCode::CourseReferenceMissing,
            "Some prerequisites do not exist",
        )
        .with_prerequisites(missing),
    };
    HttpResponse::BadRequest().json(body)
}

pub fn internal_error_response(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ErrorResponse::new(ErrorCode::InternalServerError, message))
}
