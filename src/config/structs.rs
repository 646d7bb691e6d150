use serde::{Deserialize, Serialize};

/// 课程服务配置
///
/// 对应 `config.toml` 的四个段落，`cors` 段可省略。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub service_name: String,
    pub environment: String, // development / production
    pub log_level: String,   // EnvFilter 语法，例如 "info,sea_orm=warn"
}

/// HTTP 监听与 worker 设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 非空时改为监听 Unix 套接字
    #[serde(default)]
    pub unix_socket_path: String,
    /// 0 表示按 CPU 核心数
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,    // 毫秒
    pub client_disconnect: u64, // 毫秒
    pub keep_alive: u64,        // 秒
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// 请求体上限，课程与院系的 JSON 都很小
    pub max_payload_size: usize,
}

/// 课程库连接，类型由 url 推断（sqlite / postgres / mysql）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub timeout: u64, // 秒
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 为空时允许任意来源
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: 3600,
        }
    }
}
