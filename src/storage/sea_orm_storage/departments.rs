//! 院系存储操作

use super::{SeaOrmStorage, apply_window};
use super::relations::detach_department;
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::errors::{Result, SisError};
use crate::models::{
    PageWindow,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentChanges},
        responses::DepartmentListResponse,
    },
};
use crate::storage::EntityRef;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建院系
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name_ar: Set(req.name.ar),
            name_en: Set(req.name.en),
            capacity: Set(req.capacity),
            program: Set(req.program.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // 唯一约束冲突保留为 Duplicate，交给服务层翻译
        let result = model.insert(&self.db).await.map_err(SisError::from)?;

        Ok(result.into_department())
    }

    /// 通过编码获取院系
    pub async fn get_department_by_code_impl(&self, code: &str) -> Result<Option<Department>> {
        let result = Departments::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询院系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 分页列出院系，按编码升序
    pub async fn list_departments_with_pagination_impl(
        &self,
        window: PageWindow,
    ) -> Result<DepartmentListResponse> {
        let select = Departments::find().order_by_asc(Column::Code);

        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询院系总数失败: {e}")))?;

        let departments = apply_window(select, window)
            .all(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询院系列表失败: {e}")))?;

        Ok(DepartmentListResponse {
            departments: departments
                .into_iter()
                .map(|m| m.into_department().view())
                .collect(),
            total: total as i64,
        })
    }

    /// 更新院系信息
    pub async fn update_department_impl(
        &self,
        id: i64,
        changes: DepartmentChanges,
    ) -> Result<Option<Department>> {
        // 先检查院系是否存在
        let existing = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("查询院系失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(code) = changes.code {
            model.code = Set(code);
        }

        if let Some(name) = changes.name {
            model.name_ar = Set(name.ar);
            model.name_en = Set(name.en);
        }

        if let Some(capacity) = changes.capacity {
            model.capacity = Set(capacity);
        }

        if let Some(program) = changes.program {
            model.program = Set(program.to_string());
        }

        let updated = model.update(&self.db).await.map_err(SisError::from)?;

        Ok(Some(updated.into_department()))
    }

    /// 删除院系，同一事务内清理课程关联
    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SisError::database_operation(format!("开启事务失败: {e}")))?;

        detach_department(&txn, id).await?;

        let result = Departments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SisError::database_operation(format!("删除院系失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SisError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量按编码查找院系
    pub async fn find_departments_by_codes_impl(&self, codes: &[String]) -> Result<Vec<EntityRef>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Departments::find()
            .filter(Column::Code.is_in(codes.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| SisError::database_operation(format!("批量查询院系失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|m| EntityRef {
                id: m.id,
                code: m.code,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::common::LocalizedText;
    use crate::models::departments::entities::Program;
    use crate::models::departments::requests::{CreateDepartmentRequest, DepartmentChanges};
    use crate::models::{PageWindow, PaginationQuery};

    fn department(code: &str) -> CreateDepartmentRequest {
        CreateDepartmentRequest {
            code: code.to_string(),
            name: LocalizedText {
                ar: format!("قسم {code}"),
                en: format!("Department {code}"),
            },
            capacity: 120,
            program: Program::General,
        }
    }

    #[actix_web::test]
    async fn test_duplicate_code_is_reported_as_duplicate() {
        let storage = memory_storage().await;
        storage.create_department_impl(department("CS")).await.unwrap();

        let err = storage
            .create_department_impl(department("CS"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[actix_web::test]
    async fn test_list_is_sorted_and_total_ignores_window() {
        let storage = memory_storage().await;
        for code in ["MATH", "CS", "PHY"] {
            storage.create_department_impl(department(code)).await.unwrap();
        }

        let window = PaginationQuery {
            skip: 1,
            limit: Some(1),
        }
        .window();
        let page = storage
            .list_departments_with_pagination_impl(window)
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.departments.len(), 1);
        assert_eq!(page.departments[0].code, "MATH");

        let all = storage
            .list_departments_with_pagination_impl(PageWindow::unbounded())
            .await
            .unwrap();
        let codes: Vec<_> = all.departments.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["CS", "MATH", "PHY"]);

        let tail = storage
            .list_departments_with_pagination_impl(PageWindow {
                skip: 2,
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(tail.total, 3);
        assert_eq!(tail.departments.len(), 1);
        assert_eq!(tail.departments[0].code, "PHY");
    }

    #[actix_web::test]
    async fn test_update_only_touches_given_fields() {
        let storage = memory_storage().await;
        let created = storage.create_department_impl(department("CS")).await.unwrap();

        let updated = storage
            .update_department_impl(
                created.id,
                DepartmentChanges {
                    capacity: Some(80),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.capacity, 80);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.program, Program::General);

        let missing = storage
            .update_department_impl(created.id + 100, DepartmentChanges::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[actix_web::test]
    async fn test_find_by_codes_returns_only_existing() {
        let storage = memory_storage().await;
        storage.create_department_impl(department("CS")).await.unwrap();
        storage.create_department_impl(department("IS")).await.unwrap();

        let found = storage
            .find_departments_by_codes_impl(&["CS".to_string(), "XX".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "CS");
    }

    #[actix_web::test]
    async fn test_delete_department() {
        let storage = memory_storage().await;
        let created = storage.create_department_impl(department("CS")).await.unwrap();

        assert!(storage.delete_department_impl(created.id).await.unwrap());
        assert!(!storage.delete_department_impl(created.id).await.unwrap());
        assert!(
            storage
                .get_department_by_code_impl("CS")
                .await
                .unwrap()
                .is_none()
        );
    }
}
