//! 课程关联表的写路径
//!
//! 关联集合采用整体替换：先删除该课程在对应表中的全部关联行，再批量插入新集合。
//! 调用方负责去重，这里不做去重。所有函数都接受任意连接，以便在事务中调用。

use crate::entity::course_departments::{
    ActiveModel as CourseDepartmentActiveModel, Column as CourseDepartmentColumn,
};
use crate::entity::course_prerequisites::{
    ActiveModel as CoursePrerequisiteActiveModel, Column as CoursePrerequisiteColumn,
};
use crate::entity::prelude::{CourseDepartments, CoursePrerequisites};
use crate::errors::{Result, SisError};
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// 课程关联的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RelationKind {
    Departments,
    Prerequisites,
}

/// 用新集合整体替换课程的某类关联
pub(super) async fn replace_relations<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    kind: RelationKind,
    target_ids: &[i64],
) -> Result<()> {
    clear_relations(conn, course_id, kind).await?;
    insert_relations(conn, course_id, kind, target_ids).await
}

/// 追加关联行，不触碰已有行
pub(super) async fn insert_relations<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    kind: RelationKind,
    target_ids: &[i64],
) -> Result<()> {
    if target_ids.is_empty() {
        return Ok(());
    }

    match kind {
        RelationKind::Departments => {
            let rows = target_ids.iter().map(|&department_id| CourseDepartmentActiveModel {
                course_id: Set(course_id),
                department_id: Set(department_id),
                ..Default::default()
            });
            CourseDepartments::insert_many(rows)
                .exec(conn)
                .await
                .map_err(SisError::from)?;
        }
        RelationKind::Prerequisites => {
            let rows = target_ids
                .iter()
                .map(|&prerequisite_id| CoursePrerequisiteActiveModel {
                    course_id: Set(course_id),
                    prerequisite_id: Set(prerequisite_id),
                    ..Default::default()
                });
            CoursePrerequisites::insert_many(rows)
                .exec(conn)
                .await
                .map_err(SisError::from)?;
        }
    }

    Ok(())
}

/// 删除课程自身的某类关联行
async fn clear_relations<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    kind: RelationKind,
) -> Result<()> {
    match kind {
        RelationKind::Departments => {
            CourseDepartments::delete_many()
                .filter(CourseDepartmentColumn::CourseId.eq(course_id))
                .exec(conn)
                .await
                .map_err(|e| {
                    SisError::database_operation(format!("删除课程院系关联失败: {e}"))
                })?;
        }
        RelationKind::Prerequisites => {
            CoursePrerequisites::delete_many()
                .filter(CoursePrerequisiteColumn::CourseId.eq(course_id))
                .exec(conn)
                .await
                .map_err(|e| {
                    SisError::database_operation(format!("删除先修课程关联失败: {e}"))
                })?;
        }
    }

    Ok(())
}

/// 删除课程作为任一端点出现的全部关联行
pub(super) async fn detach_course<C: ConnectionTrait>(conn: &C, course_id: i64) -> Result<()> {
    clear_relations(conn, course_id, RelationKind::Departments).await?;

    CoursePrerequisites::delete_many()
        .filter(
            Condition::any()
                .add(CoursePrerequisiteColumn::CourseId.eq(course_id))
                .add(CoursePrerequisiteColumn::PrerequisiteId.eq(course_id)),
        )
        .exec(conn)
        .await
        .map_err(|e| SisError::database_operation(format!("删除先修课程关联失败: {e}")))?;

    Ok(())
}

/// 删除院系的全部课程关联行
pub(super) async fn detach_department<C: ConnectionTrait>(
    conn: &C,
    department_id: i64,
) -> Result<()> {
    CourseDepartments::delete_many()
        .filter(CourseDepartmentColumn::DepartmentId.eq(department_id))
        .exec(conn)
        .await
        .map_err(|e| SisError::database_operation(format!("删除院系课程关联失败: {e}")))?;

    Ok(())
}

/// 按插入顺序列出课程的关联目标 ID
pub(super) async fn list_target_ids<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    kind: RelationKind,
) -> Result<Vec<i64>> {
    let ids = match kind {
        RelationKind::Departments => CourseDepartments::find()
            .filter(CourseDepartmentColumn::CourseId.eq(course_id))
            .order_by_asc(CourseDepartmentColumn::Id)
            .all(conn)
            .await
            .map_err(|e| SisError::database_operation(format!("查询课程院系关联失败: {e}")))?
            .into_iter()
            .map(|row| row.department_id)
            .collect(),
        RelationKind::Prerequisites => CoursePrerequisites::find()
            .filter(CoursePrerequisiteColumn::CourseId.eq(course_id))
            .order_by_asc(CoursePrerequisiteColumn::Id)
            .all(conn)
            .await
            .map_err(|e| SisError::database_operation(format!("查询先修课程关联失败: {e}")))?
            .into_iter()
            .map(|row| row.prerequisite_id)
            .collect(),
    };

    Ok(ids)
}
