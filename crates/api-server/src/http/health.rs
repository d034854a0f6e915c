use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use shared::models::{HealthResponse, ServiceInfo};

use super::{SERVICE_NAME, SERVICE_VERSION};

pub(super) async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
        }),
    )
}

pub(super) async fn service_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ServiceInfo {
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
            health: "/health".to_string(),
            status: "running".to_string(),
        }),
    )
}
