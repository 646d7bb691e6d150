//! 课程存储操作
//!
//! 基础记录写入与关联替换在同一事务中完成，任何一步失败都会整体回滚。

use super::SeaOrmStorage;
use super::relations::{
    RelationKind, detach_course, insert_relations, list_target_ids, replace_relations,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{Result, SisError};
use crate::models::courses::{
    entities::Course,
    requests::{CourseChanges, NewCourse, RelationReplacement},
};
use crate::storage::EntityRef;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 批量按编码查找课程
    pub async fn find_courses_by_codes_impl(&self, codes: &[String]) -> Result<Vec<EntityRef>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Courses::find()
            .filter(Column::Code.is_in(codes.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("批量查询课程失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|m| EntityRef {
                id: m.id,
                code: m.code,
            })
            .collect())
    }

    /// 通过编码获取课程
    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 创建课程并写入院系与先修课程关联
    pub async fn create_course_impl(
        &self,
        course: NewCourse,
        department_ids: Vec<i64>,
        prerequisite_ids: Vec<i64>,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SisError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            code: Set(course.code),
            name_ar: Set(course.name.ar),
            name_en: Set(course.name.en),
            description_ar: Set(course.description.ar),
            description_en: Set(course.description.en),
            credit_hours: Set(course.credit_hours),
            course_type: Set(course.course_type.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(&txn).await.map_err(SisError::from)?;

        insert_relations(&txn, created.id, RelationKind::Departments, &department_ids).await?;
        insert_relations(
            &txn,
            created.id,
            RelationKind::Prerequisites,
            &prerequisite_ids,
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| SisError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created.into_course())
    }

    /// 更新课程字段，并按需整体替换关联
    pub async fn update_course_impl(
        &self,
        id: i64,
        changes: CourseChanges,
        relations: RelationReplacement,
    ) -> Result<Option<Course>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SisError::database_operation(format!("开启事务失败: {e}")))?;

        // 先检查课程是否存在
        let existing = Courses::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SisError::database_operation(format!("查询课程失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = changes.name {
            model.name_ar = Set(name.ar);
            model.name_en = Set(name.en);
        }

        if let Some(description) = changes.description {
            model.description_ar = Set(description.ar);
            model.description_en = Set(description.en);
        }

        if let Some(credit_hours) = changes.credit_hours {
            model.credit_hours = Set(credit_hours);
        }

        if let Some(course_type) = changes.course_type {
            model.course_type = Set(course_type.to_string());
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| SisError::database_operation(format!("更新课程失败: {e}")))?;

        // 未出现在请求中的关联保持不变
        if let Some(department_ids) = relations.department_ids {
            replace_relations(&txn, id, RelationKind::Departments, &department_ids).await?;
        }

        if let Some(prerequisite_ids) = relations.prerequisite_ids {
            replace_relations(&txn, id, RelationKind::Prerequisites, &prerequisite_ids).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SisError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_course()))
    }

    /// 删除课程，同一事务内清理所有引用它的关联行
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SisError::database_operation(format!("开启事务失败: {e}")))?;

        detach_course(&txn, id).await?;

        let result = Courses::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SisError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SisError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出课程的先修课程 ID（按关联插入顺序）
    pub async fn list_prerequisite_ids_impl(&self, course_id: i64) -> Result<Vec<i64>> {
        list_target_ids(&self.db, course_id, RelationKind::Prerequisites).await
    }

    /// 追加先修课程关联
    pub async fn add_course_prerequisites_impl(
        &self,
        course_id: i64,
        prerequisite_ids: Vec<i64>,
    ) -> Result<()> {
        insert_relations(
            &self.db,
            course_id,
            RelationKind::Prerequisites,
            &prerequisite_ids,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::relations::{RelationKind, list_target_ids};
    use super::super::test_support::memory_storage;
    use crate::models::common::LocalizedText;
    use crate::models::courses::entities::CourseType;
    use crate::models::courses::requests::{CourseChanges, NewCourse, RelationReplacement};
    use crate::models::departments::entities::Program;
    use crate::models::departments::requests::CreateDepartmentRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn text(value: &str) -> LocalizedText {
        LocalizedText {
            ar: format!("{value} ar"),
            en: format!("{value} en"),
        }
    }

    fn new_course(code: &str) -> NewCourse {
        NewCourse {
            code: code.to_string(),
            name: text(code),
            description: text("description"),
            credit_hours: 3,
            course_type: CourseType::Compulsory,
        }
    }

    async fn seed_department(storage: &SeaOrmStorage, code: &str) -> i64 {
        storage
            .create_department_impl(CreateDepartmentRequest {
                code: code.to_string(),
                name: text(code),
                capacity: 100,
                program: Program::General,
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_create_course_writes_relations() {
        let storage = memory_storage().await;
        let cs = seed_department(&storage, "CS").await;
        let is = seed_department(&storage, "IS").await;
        let base = storage
            .create_course_impl(new_course("CS101"), vec![], vec![])
            .await
            .unwrap();

        let course = storage
            .create_course_impl(new_course("CS201"), vec![is, cs], vec![base.id])
            .await
            .unwrap();

        let departments = list_target_ids(&storage.db, course.id, RelationKind::Departments)
            .await
            .unwrap();
        assert_eq!(departments, vec![is, cs]);
        assert_eq!(
            storage.list_prerequisite_ids_impl(course.id).await.unwrap(),
            vec![base.id]
        );
    }

    #[actix_web::test]
    async fn test_failed_create_rolls_back_base_row() {
        let storage = memory_storage().await;

        // 不存在的院系 ID 触发外键错误，课程记录不应残留
        let result = storage
            .create_course_impl(new_course("CS101"), vec![9999], vec![])
            .await;
        assert!(result.is_err());
        assert!(
            storage
                .get_course_by_code_impl("CS101")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn test_update_replaces_prerequisites() {
        let storage = memory_storage().await;
        let a = storage
            .create_course_impl(new_course("CS101"), vec![], vec![])
            .await
            .unwrap();
        let b = storage
            .create_course_impl(new_course("CS102"), vec![], vec![])
            .await
            .unwrap();
        let c = storage
            .create_course_impl(new_course("CS103"), vec![], vec![])
            .await
            .unwrap();
        let course = storage
            .create_course_impl(new_course("CS301"), vec![], vec![a.id, b.id])
            .await
            .unwrap();

        storage
            .update_course_impl(
                course.id,
                CourseChanges::default(),
                RelationReplacement {
                    department_ids: None,
                    prerequisite_ids: Some(vec![c.id]),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            storage.list_prerequisite_ids_impl(course.id).await.unwrap(),
            vec![c.id]
        );
    }

    #[actix_web::test]
    async fn test_update_leaves_absent_relations_untouched() {
        let storage = memory_storage().await;
        let cs = seed_department(&storage, "CS").await;
        let course = storage
            .create_course_impl(new_course("CS101"), vec![cs], vec![])
            .await
            .unwrap();

        let updated = storage
            .update_course_impl(
                course.id,
                CourseChanges {
                    credit_hours: Some(4),
                    ..Default::default()
                },
                RelationReplacement::default(),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.credit_hours, 4);
        assert_eq!(updated.name, course.name);
        let departments = list_target_ids(&storage.db, course.id, RelationKind::Departments)
            .await
            .unwrap();
        assert_eq!(departments, vec![cs]);
    }

    #[actix_web::test]
    async fn test_delete_course_removes_rows_on_both_sides() {
        let storage = memory_storage().await;
        let cs = seed_department(&storage, "CS").await;
        let base = storage
            .create_course_impl(new_course("CS101"), vec![cs], vec![])
            .await
            .unwrap();
        let advanced = storage
            .create_course_impl(new_course("CS201"), vec![cs], vec![base.id])
            .await
            .unwrap();

        assert!(storage.delete_course_impl(base.id).await.unwrap());

        assert!(
            storage
                .list_prerequisite_ids_impl(advanced.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            list_target_ids(&storage.db, base.id, RelationKind::Departments)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(!storage.delete_course_impl(base.id).await.unwrap());
    }

    #[actix_web::test]
    async fn test_add_prerequisites_appends() {
        let storage = memory_storage().await;
        let a = storage
            .create_course_impl(new_course("CS101"), vec![], vec![])
            .await
            .unwrap();
        let b = storage
            .create_course_impl(new_course("CS102"), vec![], vec![])
            .await
            .unwrap();
        let course = storage
            .create_course_impl(new_course("CS201"), vec![], vec![a.id])
            .await
            .unwrap();

        storage
            .add_course_prerequisites_impl(course.id, vec![b.id])
            .await
            .unwrap();

        assert_eq!(
            storage.list_prerequisite_ids_impl(course.id).await.unwrap(),
            vec![a.id, b.id]
        );

        // 已存在的关联由唯一索引拒绝
        let err = storage
            .add_course_prerequisites_impl(course.id, vec![a.id])
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }
}
