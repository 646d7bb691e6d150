//! 请求体与查询参数的反序列化错误处理
//!
//! 将 actix-web 的默认纯文本错误转换为统一的 JSON 错误信封。

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ErrorCode, ErrorResponse};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid JSON body for {}: {}", req.path(), err);

    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        _ => format!("Invalid request body: {err}"),
    };

    let response =
        HttpResponse::BadRequest().json(ErrorResponse::new(ErrorCode::ValidationFailed, message));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid query string for {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
