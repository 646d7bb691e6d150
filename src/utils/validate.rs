use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::common::{LocalizedText, LocalizedTextPatch};

static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,4}\d{3}$").expect("Invalid course code regex"));

static DEPARTMENT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,}\d*$").expect("Invalid department code regex"));

pub const MIN_CREDIT_HOURS: i32 = 1;
pub const MAX_CREDIT_HOURS: i32 = 4;

pub fn validate_course_code(code: &str) -> Result<(), String> {
    // 2~4 个大写字母 + 3 位数字，例如 CS101
    if !COURSE_CODE_RE.is_match(code) {
        return Err(format!(
            "Course code '{code}' is invalid: expected 2-4 uppercase letters followed by 3 digits"
        ));
    }
    Ok(())
}

pub fn validate_department_code(code: &str) -> Result<(), String> {
    // 至少 2 个大写字母，可跟数字
    if !DEPARTMENT_CODE_RE.is_match(code) {
        return Err(format!(
            "Department code '{code}' is invalid: expected at least 2 uppercase letters optionally followed by digits"
        ));
    }
    Ok(())
}

pub fn validate_credit_hours(credit_hours: i32) -> Result<(), String> {
    if !(MIN_CREDIT_HOURS..=MAX_CREDIT_HOURS).contains(&credit_hours) {
        return Err(format!(
            "Credit hours must be between {MIN_CREDIT_HOURS} and {MAX_CREDIT_HOURS}"
        ));
    }
    Ok(())
}

pub fn validate_capacity(capacity: i32) -> Result<(), &'static str> {
    if capacity < 0 {
        return Err("Department capacity must not be negative");
    }
    Ok(())
}

/// 双语字段两种语言都必须非空
pub fn validate_localized(field: &str, text: &LocalizedText) -> Result<(), String> {
    if text.ar.trim().is_empty() {
        return Err(format!("{field}.ar must not be empty"));
    }
    if text.en.trim().is_empty() {
        return Err(format!("{field}.en must not be empty"));
    }
    Ok(())
}

/// 部分更新时只校验出现的语言
pub fn validate_localized_patch(field: &str, patch: &LocalizedTextPatch) -> Result<(), String> {
    if patch.is_empty() {
        return Err(format!("{field} must contain at least one of ar, en"));
    }
    if patch.ar.as_deref().is_some_and(|ar| ar.trim().is_empty()) {
        return Err(format!("{field}.ar must not be empty"));
    }
    if patch.en.as_deref().is_some_and(|en| en.trim().is_empty()) {
        return Err(format!("{field}.en must not be empty"));
    }
    Ok(())
}
