use crate::config::AppConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
/// 创建存储后端并完成数据库迁移
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();
    debug!(
        "Connecting to database (pool size: {}, timeout: {}s)",
        config.database.pool_size, config.database.timeout
    );

    let storage = crate::storage::create_storage(&config.database)
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    StartupContext { storage }
}
