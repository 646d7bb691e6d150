pub mod common;
pub mod courses;
pub mod departments;
pub mod system;

pub use common::*;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
