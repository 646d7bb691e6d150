use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::AppStartTime;
use crate::models::system::responses::HealthResponse;

pub async fn health(_service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let now = chrono::Utc::now();
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| start.start_datetime)
        .unwrap_or(now);

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at,
        uptime_seconds: now.signed_duration_since(started_at).num_seconds(),
    }))
}
