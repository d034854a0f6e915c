use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use shared::store::ArtifactStore;

mod analyze;
mod builds;
mod errors;
mod health;
mod upload;

pub(crate) const SERVICE_NAME: &str = "stevedore-api";
pub(crate) const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ArtifactStore>,
    pub max_upload_bytes: usize,
}

pub fn build_router(app_state: AppState) -> Router {
    let max_upload_bytes = app_state.max_upload_bytes;

    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health))
        .route("/build", post(builds::create_build))
        .route("/build/{build_id}", get(builds::get_build_status))
        .route("/analyze", post(analyze::analyze_dockerfile))
        .route("/upload-build", post(upload::upload_build_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(app_state)
}
