use thiserror::Error;

/// Errors that can occur during document storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested document was not found.
    #[error("document not found: {0}")]
    NotFound(String),
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The upload filename failed validation.
    #[error("invalid filename: {0}")]
    InvalidFilename(&'static str),
    /// The document exceeds the configured size limit.
    #[error("document exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}
