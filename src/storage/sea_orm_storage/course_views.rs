//! 课程视图组装
//!
//! 读路径：先取出课程基础记录，再批量取出院系关联（连带院系记录）与先修课程关联，
//! 最后按课程 ID 分组拼装成反规范化视图。关联成员保持关联行的插入顺序，
//! 内部 ID 不会出现在输出中。

use std::collections::HashMap;

use super::{SeaOrmStorage, apply_window};
use crate::entity::{course_departments, course_prerequisites, courses, departments};
use crate::errors::{Result, SisError};
use crate::models::courses::{
    entities::{CourseSummary, CourseView},
    requests::CourseListQuery,
    responses::CourseListResponse,
};
use crate::models::departments::entities::DepartmentView;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 获取单个课程的完整视图
    pub async fn compose_course_impl(&self, code: &str) -> Result<Option<CourseView>> {
        let course = courses::Entity::find()
            .filter(courses::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询课程失败: {e}")))?;

        let Some(course) = course else {
            return Ok(None);
        };

        Ok(self.compose_views(vec![course]).await?.pop())
    }

    /// 分页获取课程视图，按编码升序，可按院系编码筛选
    pub async fn compose_course_list_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let mut select = courses::Entity::find();

        // 院系筛选：先解析为内部 ID，不存在则返回空结果
        if let Some(ref department_code) = query.department {
            let department = departments::Entity::find()
                .filter(departments::Column::Code.eq(department_code.as_str()))
                .one(&self.db)
                .await
                .map_err(|e| SisError::database_operation(format!("查询院系失败: {e}")))?;

            let Some(department) = department else {
                return Ok(empty_list());
            };

            let course_ids: Vec<i64> = course_departments::Entity::find()
                .filter(course_departments::Column::DepartmentId.eq(department.id))
                .all(&self.db)
                .await
                .map_err(|e| SisError::database_operation(format!("查询院系课程关联失败: {e}")))?
                .into_iter()
                .map(|link| link.course_id)
                .collect();

            if course_ids.is_empty() {
                return Ok(empty_list());
            }

            select = select.filter(courses::Column::Id.is_in(course_ids));
        }

        let select = select.order_by_asc(courses::Column::Code);

        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询课程总数失败: {e}")))?;

        let models = apply_window(select, query.window)
            .all(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            courses: self.compose_views(models).await?,
            total: total as i64,
        })
    }

    /// 为一批课程批量解析院系与先修课程，输出顺序与输入一致
    async fn compose_views(&self, models: Vec<courses::Model>) -> Result<Vec<CourseView>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<i64> = models.iter().map(|m| m.id).collect();

        // 院系关联 + 院系记录
        let department_links: Vec<(course_departments::Model, departments::Model)> =
            course_departments::Entity::find()
                .filter(course_departments::Column::CourseId.is_in(course_ids.clone()))
                .order_by_asc(course_departments::Column::Id)
                .find_also_related(departments::Entity)
                .all(&self.db)
                .await
                .map_err(|e| SisError::database_operation(format!("查询课程院系失败: {e}")))?
                .into_iter()
                .filter_map(|(link, department)| department.map(|d| (link, d)))
                .collect();

        let mut departments_by_course: HashMap<i64, Vec<DepartmentView>> = HashMap::new();
        for (link, department) in department_links {
            departments_by_course
                .entry(link.course_id)
                .or_default()
                .push(department.into_department().view());
        }

        // 先修课程关联，两端都在 courses 表，按 ID 批量解析
        let prerequisite_links = course_prerequisites::Entity::find()
            .filter(course_prerequisites::Column::CourseId.is_in(course_ids))
            .order_by_asc(course_prerequisites::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询先修课程关联失败: {e}")))?;

        let mut prerequisites_by_course: HashMap<i64, Vec<CourseSummary>> = HashMap::new();
        if !prerequisite_links.is_empty() {
            let mut prerequisite_ids: Vec<i64> = prerequisite_links
                .iter()
                .map(|link| link.prerequisite_id)
                .collect();
            prerequisite_ids.sort_unstable();
            prerequisite_ids.dedup();

            let summaries: HashMap<i64, CourseSummary> = courses::Entity::find()
                .filter(courses::Column::Id.is_in(prerequisite_ids))
                .all(&self.db)
                .await
                .map_err(|e| SisError::database_operation(format!("查询先修课程失败: {e}")))?
                .into_iter()
                .map(|m| (m.id, m.into_course().summary()))
                .collect();

            for link in prerequisite_links {
                if let Some(summary) = summaries.get(&link.prerequisite_id) {
                    prerequisites_by_course
                        .entry(link.course_id)
                        .or_default()
                        .push(summary.clone());
                }
            }
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let id = model.id;
                model.into_course().into_view(
                    departments_by_course.remove(&id).unwrap_or_default(),
                    prerequisites_by_course.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

fn empty_list() -> CourseListResponse {
    CourseListResponse {
        courses: Vec::new(),
        total: 0,
    }
}
