use axum::Json;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::UploadResponse;
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::bad_request_response;

/// Accepts the first file field of the multipart payload, reads it fully
/// into memory, and reports its byte length. The body is not persisted.
pub(super) async fn upload_build_file(mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return bad_request_response(
                    "missing_file",
                    "Multipart request contained no file field",
                );
            }
            Err(err) => {
                warn!("multipart payload could not be read: {err}");
                return bad_request_response(
                    "invalid_multipart",
                    "Multipart payload could not be read",
                );
            }
        };

        let Some(filename) = field.file_name().map(ToString::to_string) else {
            continue;
        };

        let contents = match field.bytes().await {
            Ok(contents) => contents,
            Err(err) => {
                warn!("multipart file field could not be read: {err}");
                return bad_request_response(
                    "invalid_multipart",
                    "Multipart file field could not be read",
                );
            }
        };

        let file_id = format!("uploaded_{}", Uuid::new_v4().as_simple());
        info!(%file_id, filename = %filename, size = contents.len(), "file uploaded");

        return (
            StatusCode::OK,
            Json(UploadResponse {
                message: "File uploaded successfully".to_string(),
                filename,
                file_id,
                size: contents.len(),
            }),
        )
            .into_response();
    }
}
