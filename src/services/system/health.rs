use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::Utc;

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{ApiResponse, AppStartTime};
use crate::services::finish;

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    finish(async {
        let storage = service.get_storage(request)?;

        let uptime_seconds = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| {
                Utc::now()
                    .signed_duration_since(start.start_datetime)
                    .num_seconds()
            })
            .unwrap_or_default();
        let database = storage.ping().await;

        let response = HealthResponse {
            status: if database { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds,
            database,
        };
        // 数据库不可达时返回 503，便于负载均衡摘除
        let mut builder = if database {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        Ok(builder.json(ApiResponse::success(response, "Health check completed")))
    })
    .await
}
