use std::time::Duration;

use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, info, warn};

use sis_course_service::config::AppConfig;
use sis_course_service::models::AppStartTime;
use sis_course_service::routes;
use sis_course_service::runtime::lifetime;
use sis_course_service::utils::{json_error_handler, query_error_handler};

/// 开发环境输出带文件行号的文本日志，其余环境输出 JSON
fn init_tracing(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(writer)
        .with_level(true);

    if config.is_development() {
        builder
            .with_ansi(true)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        builder.with_ansi(false).json().init();
    }

    guard
}

fn build_cors(config: &AppConfig) -> Cors {
    let cors = if config.cors_allows_any_origin() {
        Cors::default().allow_any_origin()
    } else {
        config
            .cors
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(["GET", "POST", "PATCH", "DELETE"])
        .allow_any_header()
        .max_age(config.cors.max_age)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    setup_panic!();

    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();
    let _log_guard = init_tracing(config);

    info!(
        "{} v{} starting ({} environment)",
        config.app.service_name,
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    // 建库、迁移
    let startup = lifetime::startup::prepare_server_startup().await;
    let storage = startup.storage;

    debug!(
        "Course store ready after {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_milliseconds()
    );
    warn!("Using {} worker(s)", config.server.workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(config))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add((
                "Keep-Alive",
                format!("timeout={}", config.server.timeouts.keep_alive),
            )))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PayloadConfig::new(config.server.limits.max_payload_size))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(routes::configure_course_routes)
            .configure(routes::configure_department_routes)
            .configure(routes::configure_system_routes)
    })
    .keep_alive(Duration::from_secs(config.server.timeouts.keep_alive))
    .client_request_timeout(Duration::from_millis(config.server.timeouts.client_request))
    .client_disconnect_timeout(Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    #[cfg(unix)]
    let server = match config.unix_socket_path() {
        Some(socket_path) => {
            warn!("Listening on Unix socket {}", socket_path);
            // 清理上次异常退出留下的套接字文件
            if std::path::Path::new(socket_path).exists() {
                std::fs::remove_file(socket_path)?;
            }
            server.bind_uds(socket_path)?
        }
        None => {
            warn!("Listening on http://{}", config.server_bind_address());
            server.bind(config.server_bind_address())?
        }
    };

    #[cfg(not(unix))]
    let server = {
        warn!("Listening on http://{}", config.server_bind_address());
        server.bind(config.server_bind_address())?
    };

    tokio::select! {
        res = server.run() => res?,
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Course service stopped");
        }
    }

    Ok(())
}
