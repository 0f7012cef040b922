//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use imgvoice_core::StoredObjectReference;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Each backend is bound to a single bucket at construction. Handlers hold it as
/// `Arc<dyn Storage>` so tests can substitute an in-memory double.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `key` in this backend's bucket.
    ///
    /// A failed upload leaves no object behind that the caller should rely on.
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredObjectReference>;

    /// Bucket the backend writes into.
    fn bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
