/// 测试用应用：内存 SQLite + 全部路由 + 参数错误处理器
#[cfg(test)]
macro_rules! init_test_app {
    () => {{
        let storage: std::sync::Arc<dyn crate::storage::Storage> = std::sync::Arc::new(
            crate::storage::sea_orm_storage::test_support::memory_storage().await,
        );
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(crate::utils::query_error_handler),
                )
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(crate::utils::json_error_handler),
                )
                .app_data(actix_web::web::Data::new(storage))
                .configure(crate::routes::configure_course_routes)
                .configure(crate::routes::configure_department_routes)
                .configure(crate::routes::configure_system_routes),
        )
        .await
    }};
}

pub mod courses;

pub mod departments;

pub mod system;

pub use courses::configure_course_routes;
pub use departments::configure_department_routes;
pub use system::configure_system_routes;
