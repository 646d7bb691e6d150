use serde::Serialize;
use ts_rs::TS;

use super::entities::DepartmentView;

// 单个院系响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct DepartmentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
    pub department: DepartmentView,
}

// 院系列表响应，total 不受 skip / limit 影响
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct DepartmentListResponse {
    pub departments: Vec<DepartmentView>,
    pub total: i64,
}
