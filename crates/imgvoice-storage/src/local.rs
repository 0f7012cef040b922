use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use imgvoice_core::StoredObjectReference;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem storage implementation
///
/// Objects are written to `{base_path}/{bucket}/{key}`. Meant for development without
/// an S3 account; the processing service must be able to read the same directory.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    bucket: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance, creating the bucket directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>, bucket: String) -> StorageResult<Self> {
        let base_path = base_path.into();
        validate_key(&bucket)
            .map_err(|_| StorageError::ConfigError(format!("Invalid bucket name '{}'", bucket)))?;

        let bucket_dir = base_path.join(&bucket);
        fs::create_dir_all(&bucket_dir).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                bucket_dir.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path, bucket })
    }

    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.bucket_dir().join(key))
    }

    fn bucket_dir(&self) -> PathBuf {
        self.base_path.join(&self.bucket)
    }

    /// Path an object with `key` is (or would be) stored at.
    pub fn object_path(&self, key: &str) -> StorageResult<PathBuf> {
        self.key_to_path(key)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        key: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredObjectReference> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        let start = std::time::Instant::now();

        // Write to a sibling temp file first so a failed write never leaves a partial object.
        let tmp_path = self
            .bucket_dir()
            .join(format!(".{}.{}.partial", key, Uuid::new_v4()));
        let write = async {
            let mut file = fs::File::create(&tmp_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
            fs::rename(&tmp_path, &path).await
        };

        if let Err(e) = write.await {
            let _ = fs::remove_file(&tmp_path).await;
            tracing::error!(
                error = %e,
                path = %path.display(),
                key = %key,
                size_bytes = size,
                "Local storage upload failed"
            );
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredObjectReference::new(self.bucket.clone(), key))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
