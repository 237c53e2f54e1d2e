use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use serde::Serialize;

use crate::models::registration::MessageResponse;

/// Error response body for validation and upload failures: `{"error": ...}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "Missing required field: firstName")]
    pub error: String,
}

/// Error response body for storage failures: `{"message": ..., "error": ...}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FailureBody {
    /// What the server was doing when it failed.
    #[schema(example = "There was an error updating the registration")]
    pub message: String,
    /// The underlying error.
    pub error: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request data. 400 with `{"error"}`.
    Validation(String),
    /// Unknown record id or document reference. 404 with `{"message"}`.
    NotFound(String),
    /// Malformed multipart payload or failed document write. Reported as a
    /// generic upload error; the detail is only logged.
    Upload(String),
    /// Database or filesystem operation failure. 500 with `{"message","error"}`.
    Storage { message: String, detail: String },
}

impl AppError {
    /// A storage failure with the endpoint's user-facing context message.
    pub fn storage(message: &str, err: impl std::fmt::Display) -> Self {
        AppError::Storage {
            message: message.to_string(),
            detail: err.to_string(),
        }
    }

    /// Map a document-intake failure during create/update: size and filename
    /// problems are the client's fault, anything else is a generic upload
    /// error.
    pub fn from_intake(err: StorageError) -> Self {
        match err {
            StorageError::SizeLimitExceeded { .. } | StorageError::InvalidFilename(_) => {
                AppError::Validation(err.to_string())
            }
            other => AppError::Upload(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: msg })).into_response()
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(MessageResponse { message: msg }),
            )
                .into_response(),
            AppError::Upload(detail) => {
                tracing::error!("Upload error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "File upload failed".into(),
                    }),
                )
                    .into_response()
            }
            AppError::Storage { message, detail } => {
                tracing::error!("Storage error: {}: {}", message, detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FailureBody {
                        message,
                        error: detail,
                    }),
                )
                    .into_response()
            }
        }
    }
}
