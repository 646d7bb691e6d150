//! 路径参数提取器
//!
//! 从路由中取出自然键，去除首尾空白并校验格式，格式错误直接返回 400 错误信封。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use super::validate::{validate_course_code, validate_department_code};
use crate::models::{ErrorCode, ErrorResponse};

fn extract_code(
    req: &HttpRequest,
    param: &str,
    error_code: ErrorCode,
    validate: fn(&str) -> Result<(), String>,
) -> Result<String, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    let code = raw.trim();

    if let Err(msg) = validate(code) {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(error_code, &msg));
        return Err(InternalError::from_response(msg, response).into());
    }

    Ok(code.to_string())
}

/// 路径中的课程编码 `{course_code}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeCourseCode(pub String);

impl FromRequest for SafeCourseCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            extract_code(
                req,
                "course_code",
                ErrorCode::CourseCodeInvalid,
                validate_course_code,
            )
            .map(SafeCourseCode),
        )
    }
}

/// 路径中的院系编码 `{department_code}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeDepartmentCode(pub String);

impl FromRequest for SafeDepartmentCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            extract_code(
                req,
                "department_code",
                ErrorCode::DepartmentCodeInvalid,
                validate_department_code,
            )
            .map(SafeDepartmentCode),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_course_code_is_trimmed() {
        let req = TestRequest::default()
            .param("course_code", " CS101 ")
            .to_http_request();
        let code = SafeCourseCode::extract(&req).await.unwrap();
        assert_eq!(code.0, "CS101");
    }

    #[actix_web::test]
    async fn test_invalid_course_code_is_rejected() {
        let req = TestRequest::default()
            .param("course_code", "cs101")
            .to_http_request();
        let err = SafeCourseCode::extract(&req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_department_code() {
        let req = TestRequest::default()
            .param("department_code", "CS")
            .to_http_request();
        assert_eq!(SafeDepartmentCode::extract(&req).await.unwrap().0, "CS");

        let req = TestRequest::default()
            .param("department_code", "C")
            .to_http_request();
        assert!(SafeDepartmentCode::extract(&req).await.is_err());
    }
}
