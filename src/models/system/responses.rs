use serde::Serialize;
use ts_rs::TS;

/// 健康检查响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: i64,
}
