use serde::Serialize;
use ts_rs::TS;

use super::entities::CourseView;

// 单个课程响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
    pub course: CourseView,
}

// 课程列表响应，total 不受 skip / limit 影响
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListResponse {
    pub courses: Vec<CourseView>,
    pub total: i64,
}
