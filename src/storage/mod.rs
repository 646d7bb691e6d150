use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    PageWindow,
    courses::{
        entities::{Course, CourseView},
        requests::{CourseChanges, CourseListQuery, NewCourse, RelationReplacement},
        responses::CourseListResponse,
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentChanges},
        responses::DepartmentListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 自然键与内部 ID 的对应关系
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub id: i64,
    pub code: String,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 院系管理方法
    // 创建院系
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department>;
    // 通过编码获取院系
    async fn get_department_by_code(&self, code: &str) -> Result<Option<Department>>;
    // 列出院系（按编码升序）
    async fn list_departments_with_pagination(
        &self,
        window: PageWindow,
    ) -> Result<DepartmentListResponse>;
    // 更新院系信息
    async fn update_department(
        &self,
        id: i64,
        changes: DepartmentChanges,
    ) -> Result<Option<Department>>;
    // 删除院系及其课程关联
    async fn delete_department(&self, id: i64) -> Result<bool>;
    // 批量按编码查找院系
    async fn find_departments_by_codes(&self, codes: &[String]) -> Result<Vec<EntityRef>>;

    /// 课程管理方法
    // 批量按编码查找课程
    async fn find_courses_by_codes(&self, codes: &[String]) -> Result<Vec<EntityRef>>;
    // 通过编码获取课程基础记录
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    // 在同一事务内创建课程及其关联
    async fn create_course(
        &self,
        course: NewCourse,
        department_ids: Vec<i64>,
        prerequisite_ids: Vec<i64>,
    ) -> Result<Course>;
    // 在同一事务内更新课程字段并替换关联
    async fn update_course(
        &self,
        id: i64,
        changes: CourseChanges,
        relations: RelationReplacement,
    ) -> Result<Option<Course>>;
    // 删除课程及所有引用它的关联
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 课程视图组装
    // 获取单个课程的反规范化视图
    async fn compose_course(&self, code: &str) -> Result<Option<CourseView>>;
    // 分页获取课程视图列表
    async fn compose_course_list(&self, query: CourseListQuery) -> Result<CourseListResponse>;

    /// 先修课程关联
    // 列出课程当前的先修课程 ID
    async fn list_prerequisite_ids(&self, course_id: i64) -> Result<Vec<i64>>;
    // 追加先修课程关联
    async fn add_course_prerequisites(
        &self,
        course_id: i64,
        prerequisite_ids: Vec<i64>,
    ) -> Result<()>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
