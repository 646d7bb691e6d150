use serde::Deserialize;
use ts_rs::TS;

use super::entities::Program;
use crate::models::common::{LocalizedText, LocalizedTextPatch, PaginationQuery};

// 创建院系请求体 `{ "department": { ... } }`
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct CreateDepartmentBody {
    pub department: CreateDepartmentRequest,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct CreateDepartmentRequest {
    pub code: String,
    pub name: LocalizedText,
    pub capacity: i32,
    pub program: Program,
}

// 更新院系请求体，所有字段可选
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct UpdateDepartmentBody {
    pub department: UpdateDepartmentRequest,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct UpdateDepartmentRequest {
    pub code: Option<String>,
    pub name: Option<LocalizedTextPatch>,
    pub capacity: Option<i32>,
    pub program: Option<Program>,
}

// 院系列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct DepartmentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 合并后的院系字段变更（用于存储层），None 表示保持不变
#[derive(Debug, Clone, Default)]
pub struct DepartmentChanges {
    pub code: Option<String>,
    pub name: Option<LocalizedText>,
    pub capacity: Option<i32>,
    pub program: Option<Program>,
}
