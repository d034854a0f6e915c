use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::{BuildRequest, BuildResponse};
use shared::store::{BuildStatus, NewBuild};
use tracing::info;

use super::AppState;
use super::errors::{not_found_response, store_error_response};

pub(super) async fn create_build(
    State(state): State<AppState>,
    Json(req): Json<BuildRequest>,
) -> Response {
    let record = match state
        .store
        .create_build(NewBuild {
            name: req.build_name,
            dockerfile: req.dockerfile_content,
            target: req.target,
            args: req.additional_args.unwrap_or_default(),
        })
        .await
    {
        Ok(record) => record,
        Err(err) => return store_error_response(err),
    };

    info!(build_id = %record.id, name = %record.name, "build queued");

    // No executor is wired up; the record stays Running until one exists.
    (
        StatusCode::OK,
        Json(BuildResponse {
            success: true,
            build_id: record.id,
            message: format!("Build '{}' has been queued for execution", record.name),
            output: None,
        }),
    )
        .into_response()
}

pub(super) async fn get_build_status(
    State(state): State<AppState>,
    Path(build_id): Path<String>,
) -> Response {
    match state.store.get_build(&build_id).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(BuildResponse {
                success: record.status == BuildStatus::Completed,
                build_id: record.id,
                message: format!("Build status: {}", record.status.as_str()),
                output: None,
            }),
        )
            .into_response(),
        Ok(None) => not_found_response("not_found", &format!("Build {build_id} not found")),
        Err(err) => store_error_response(err),
    }
}
