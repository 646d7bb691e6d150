use serde::Serialize;
use ts_rs::TS;

use crate::models::ErrorCode;

// 错误详情，departments / prerequisites 列出出错的编码
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ErrorDetail {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub departments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub prerequisites: Option<Vec<String>>,
}

// 统一的错误响应信封 `{ "error": { ... } }`
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code as i32,
                message: message.into(),
                departments: None,
                prerequisites: None,
            },
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_departments(mut self, codes: Vec<String>) -> Self {
        self.error.departments = Some(codes);
        self
    }

    pub fn with_prerequisites(mut self, codes: Vec<String>) -> Self {
        self.error.prerequisites = Some(codes);
        self
    }
}
