use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use common::storage::StorageError;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/uploads/{file_name}",
    tag = "Uploads",
    operation_id = "downloadUpload",
    summary = "Download a stored document",
    description = "Streams the raw bytes of a stored document by its reference \
        (the `file` value on a registration record). Unknown or malformed \
        references yield 404.",
    params(("file_name" = String, Path, description = "Stored document reference")),
    responses(
        (status = 200, description = "Document content"),
        (status = 404, description = "Document not found"),
    ),
)]
#[instrument(skip(state), fields(file_name))]
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, AppError> {
    let reader = state.documents.open(&file_name).await.map_err(|e| match e {
        // A crafted reference is indistinguishable from a missing one.
        StorageError::NotFound(_) | StorageError::InvalidFilename(_) => {
            AppError::NotFound("File not found".into())
        }
        other => AppError::storage("There was an error reading the file", other),
    })?;

    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    let mime = mime_guess::from_path(&file_name).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&file_name),
        )
        .body(body)
        .map_err(|e| AppError::storage("Failed to build response", e))
}

/// Build a safe `Content-Disposition` header value. Stored names are already
/// validated flat, but quotes and backslashes still need stripping.
fn content_disposition_value(file_name: &str) -> String {
    let ascii_safe: String = file_name
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    format!("inline; filename=\"{name}\"")
}
