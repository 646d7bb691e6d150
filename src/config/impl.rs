use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("SIS")
                    .separator("_")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否对所有来源开放跨域
    pub fn cors_allows_any_origin(&self) -> bool {
        self.cors.allowed_origins.is_empty()
            || self.cors.allowed_origins.iter().any(|o| o == "*")
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AppSettings, CorsConfig, DatabaseConfig, LimitConfig, ServerConfig, TimeoutConfig,
    };

    fn sample_config() -> AppConfig {
        AppConfig {
            app: AppSettings {
                service_name: "sis-course-service".to_string(),
                environment: "development".to_string(),
                log_level: "info".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                unix_socket_path: String::new(),
                workers: 2,
                max_workers: 4,
                timeouts: TimeoutConfig {
                    client_request: 5000,
                    client_disconnect: 1000,
                    keep_alive: 30,
                },
                limits: LimitConfig {
                    max_payload_size: 1024,
                },
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                pool_size: 1,
                timeout: 5,
            },
            cors: CorsConfig::default(),
        }
    }

    #[test]
    fn test_environment_helpers() {
        let mut config = sample_config();
        assert!(config.is_development());
        assert!(!config.is_production());

        config.app.environment = "production".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_cors_origins() {
        let mut config = sample_config();
        assert!(config.cors_allows_any_origin());

        config.cors.allowed_origins = vec!["https://sis.example.edu".to_string()];
        assert!(!config.cors_allows_any_origin());

        config.cors.allowed_origins.push("*".to_string());
        assert!(config.cors_allows_any_origin());
    }

    #[test]
    fn test_server_bind_address() {
        assert_eq!(sample_config().server_bind_address(), "127.0.0.1:8080");
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_socket_path() {
        let mut config = sample_config();
        assert_eq!(config.unix_socket_path(), None);

        config.server.unix_socket_path = "/tmp/sis.sock".to_string();
        assert_eq!(config.unix_socket_path(), Some("/tmp/sis.sock"));
    }
}
