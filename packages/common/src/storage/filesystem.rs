use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

use super::error::StorageError;
use super::filename::validate_flat_filename;
use super::traits::{BoxReader, DocumentStore};

/// Filesystem-backed document store.
///
/// Documents are stored flat in the uploads directory as
/// `{unix-millis-timestamp}-{original-filename}`. Writes go through a temp
/// file in `.tmp/` and are renamed into place.
pub struct FilesystemDocumentStore {
    uploads_dir: PathBuf,
    max_size: u64,
}

impl FilesystemDocumentStore {
    /// Create a new document store rooted at `uploads_dir`.
    pub async fn new(uploads_dir: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&uploads_dir).await?;
        fs::create_dir_all(uploads_dir.join(".tmp")).await?;
        Ok(Self {
            uploads_dir,
            max_size,
        })
    }

    /// Resolve a stored name to its path, rejecting anything that is not a
    /// plain filename.
    fn document_path(&self, stored_name: &str) -> Result<PathBuf, StorageError> {
        let name = validate_flat_filename(stored_name)
            .map_err(|e| StorageError::InvalidFilename(e.message()))?;
        Ok(self.uploads_dir.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.uploads_dir
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl DocumentStore for FilesystemDocumentStore {
    async fn store(
        &self,
        original_filename: &str,
        mut reader: BoxReader,
    ) -> Result<String, StorageError> {
        let original = validate_flat_filename(original_filename)
            .map_err(|e| StorageError::InvalidFilename(e.message()))?;

        let stored_name = format!("{}-{}", chrono::Utc::now().timestamp_millis(), original);
        let final_path = self.uploads_dir.join(&stored_name);
        let temp_path = self.temp_path();

        let mut temp_file = fs::File::create(&temp_path).await?;
        let mut total_bytes: u64 = 0;
        let mut buf = vec![0u8; 64 * 1024]; // 64KB read buffer

        loop {
            let n = match reader.read(&mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    drop(temp_file);
                    let _ = fs::remove_file(&temp_path).await;
                    return Err(e.into());
                }
            };
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_size {
                drop(temp_file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_size,
                });
            }

            temp_file.write_all(&buf[..n]).await?;
        }

        temp_file.flush().await?;
        drop(temp_file);

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(stored_name)
    }

    async fn size_of(&self, stored_name: &str) -> Result<u64, StorageError> {
        let path = self.document_path(stored_name)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(stored_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn open(&self, stored_name: &str) -> Result<BoxReader, StorageError> {
        let path = self.document_path(stored_name)?;
        match fs::File::open(&path).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(stored_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
