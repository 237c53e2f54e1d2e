use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Write-once document storage keyed by an opaque stored name.
///
/// The stored name doubles as the retrieval reference: it is persisted on the
/// registration record and appended to `/uploads/` to build the download URL.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store data from an async reader under a collision-resistant name
    /// derived from `original_filename`. Returns the stored name.
    async fn store(
        &self,
        original_filename: &str,
        reader: BoxReader,
    ) -> Result<String, StorageError>;

    /// Byte length of a stored document.
    async fn size_of(&self, stored_name: &str) -> Result<u64, StorageError>;

    /// Retrieve a stored document as a streaming async reader.
    async fn open(&self, stored_name: &str) -> Result<BoxReader, StorageError>;
}
