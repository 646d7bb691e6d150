pub mod health;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 存活检查与运行时长
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        health::health(self, request).await
    }
}
