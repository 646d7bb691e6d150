//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 课程视图组装位于 `course_views`，关联表的整体替换位于 `relations`。

mod course_views;
mod courses;
mod departments;
mod relations;

use crate::config::DatabaseConfig;
use crate::errors::{Result, SisError};
use crate::models::PageWindow;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, QuerySelect};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SisError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SisError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库每个连接各自独立，只能使用单连接
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            config.pool_size
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| SisError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SisError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SisError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
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
use crate::storage::{EntityRef, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 院系模块
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(department).await
    }

    async fn get_department_by_code(&self, code: &str) -> Result<Option<Department>> {
        self.get_department_by_code_impl(code).await
    }

    async fn list_departments_with_pagination(
        &self,
        window: PageWindow,
    ) -> Result<DepartmentListResponse> {
        self.list_departments_with_pagination_impl(window).await
    }

    async fn update_department(
        &self,
        id: i64,
        changes: DepartmentChanges,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, changes).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    async fn find_departments_by_codes(&self, codes: &[String]) -> Result<Vec<EntityRef>> {
        self.find_departments_by_codes_impl(codes).await
    }

    // 课程模块
    async fn find_courses_by_codes(&self, codes: &[String]) -> Result<Vec<EntityRef>> {
        self.find_courses_by_codes_impl(codes).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn create_course(
        &self,
        course: NewCourse,
        department_ids: Vec<i64>,
        prerequisite_ids: Vec<i64>,
    ) -> Result<Course> {
        self.create_course_impl(course, department_ids, prerequisite_ids)
            .await
    }

    async fn update_course(
        &self,
        id: i64,
        changes: CourseChanges,
        relations: RelationReplacement,
    ) -> Result<Option<Course>> {
        self.update_course_impl(id, changes, relations).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // 课程视图
    async fn compose_course(&self, code: &str) -> Result<Option<CourseView>> {
        self.compose_course_impl(code).await
    }

    async fn compose_course_list(&self, query: CourseListQuery) -> Result<CourseListResponse> {
        self.compose_course_list_impl(query).await
    }

    // 先修课程
    async fn list_prerequisite_ids(&self, course_id: i64) -> Result<Vec<i64>> {
        self.list_prerequisite_ids_impl(course_id).await
    }

    async fn add_course_prerequisites(
        &self,
        course_id: i64,
        prerequisite_ids: Vec<i64>,
    ) -> Result<()> {
        self.add_course_prerequisites_impl(course_id, prerequisite_ids)
            .await
    }
}

/// 测试用内存数据库
/// 为查询附加分页窗口
///
/// SQLite 不接受单独的 OFFSET，有 skip 但不限条数时补一个最大 LIMIT。
pub(crate) fn apply_window<Q: QuerySelect>(query: Q, window: PageWindow) -> Q {
    match (window.skip, window.limit) {
        (0, None) => query,
        (0, Some(limit)) => query.limit(limit),
        (skip, limit) => query
            .offset(skip)
            .limit(limit.unwrap_or(i64::MAX as u64)),
    }
}
