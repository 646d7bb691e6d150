use serde::Deserialize;
use ts_rs::TS;

use super::entities::CourseType;
use crate::models::common::{LocalizedText, LocalizedTextPatch, PageWindow, PaginationQuery};

// 创建课程请求体 `{ "course": { ... } }`
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CreateCourseBody {
    pub course: CreateCourseRequest,
}

// departments / prerequisites 为院系编码与课程编码
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "course.ts")]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub departments: Vec<String>,
    pub prerequisites: Vec<String>,
    pub credit_hours: i32,
    pub course_type: CourseType,
}

// 更新课程请求体，所有字段可选
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct UpdateCourseBody {
    pub course: UpdateCourseRequest,
}

// code 只允许与路径中的编码一致，课程不支持改名
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "course.ts")]
pub struct UpdateCourseRequest {
    pub code: Option<String>,
    pub name: Option<LocalizedTextPatch>,
    pub description: Option<LocalizedTextPatch>,
    pub departments: Option<Vec<String>>,
    pub prerequisites: Option<Vec<String>>,
    pub credit_hours: Option<i32>,
    pub course_type: Option<CourseType>,
}

// 先修课程接口请求体
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct PrerequisitesRequest {
    pub prerequisites: Vec<String>,
}

// 课程列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub department: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub window: PageWindow,
    pub department: Option<String>,
}

// 新课程的基础字段（用于存储层）
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub code: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub credit_hours: i32,
    pub course_type: CourseType,
}

// 合并后的课程字段变更（用于存储层），None 表示保持不变
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub credit_hours: Option<i32>,
    pub course_type: Option<CourseType>,
}

// 关联关系的整体替换，None 表示请求中未出现该字段
#[derive(Debug, Clone, Default)]
pub struct RelationReplacement {
    pub department_ids: Option<Vec<i64>>,
    pub prerequisite_ids: Option<Vec<i64>>,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(req: CreateCourseRequest) -> Self {
        NewCourse {
            code: req.code,
            name: req.name,
            description: req.description,
            credit_hours: req.credit_hours,
            course_type: req.course_type,
        }
    }
}
