use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::LocalizedText;
use crate::models::departments::entities::DepartmentView;

// 课程类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "course.ts")]
pub enum CourseType {
    Compulsory, // 必修
    Elective,   // 选修
    Graduation, // 毕业设计
}

impl CourseType {
    pub const COMPULSORY: &'static str = "compulsory";
    pub const ELECTIVE: &'static str = "elective";
    pub const GRADUATION: &'static str = "graduation";
}

impl<'de> Deserialize<'de> for CourseType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CourseType>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for CourseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseType::Compulsory => write!(f, "{}", CourseType::COMPULSORY),
            CourseType::Elective => write!(f, "{}", CourseType::ELECTIVE),
            CourseType::Graduation => write!(f, "{}", CourseType::GRADUATION),
        }
    }
}

impl std::str::FromStr for CourseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CourseType::COMPULSORY => Ok(CourseType::Compulsory),
            CourseType::ELECTIVE => Ok(CourseType::Elective),
            CourseType::GRADUATION => Ok(CourseType::Graduation),
            _ => Err(format!("Course type is invalid: '{s}'")),
        }
    }
}

// 课程基础记录（含内部 ID，仅在服务内部流转）
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub credit_hours: i32,
    pub course_type: CourseType,
}

// 课程公开字段，用作先修课程列表的元素
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "course.ts")]
pub struct CourseSummary {
    pub code: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub credit_hours: i32,
    pub course_type: CourseType,
}

// 反规范化的课程视图：课程字段 + 已解析的院系与先修课程
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "course.ts")]
pub struct CourseView {
    pub code: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub credit_hours: i32,
    pub course_type: CourseType,
    pub departments: Vec<DepartmentView>,
    pub prerequisites: Vec<CourseSummary>,
}

impl Course {
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            credit_hours: self.credit_hours,
            course_type: self.course_type,
        }
    }

    pub fn into_view(
        self,
        departments: Vec<DepartmentView>,
        prerequisites: Vec<CourseSummary>,
    ) -> CourseView {
        CourseView {
            code: self.code,
            name: self.name,
            description: self.description,
            credit_hours: self.credit_hours,
            course_type: self.course_type,
            departments,
            prerequisites,
        }
    }
}
