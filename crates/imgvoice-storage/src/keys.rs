//! Shared key checks for storage backends.
//!
//! Keys arrive already sanitized by the upload pipeline; backends still refuse anything
//! that could address an object outside the bucket root.

use crate::traits::{StorageError, StorageResult};

pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }

    if key.contains("..") || key.starts_with('/') || key.contains('\\') || key.contains('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key '{}' contains path components",
            key
        )));
    }

    Ok(())
}
