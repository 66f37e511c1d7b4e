use crate::transport::http::types::{HealthResponse, ServiceInfoResponse};
use axum::Json;
use chrono::Utc;

pub const SERVICE_NAME: &str = "Assignment Submission API";

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service identity", body = ServiceInfoResponse)
    )
)]
pub async fn root_handler() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn healthcheck_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}
