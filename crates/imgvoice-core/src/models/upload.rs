use bytes::Bytes;
use serde::Serialize;

/// The single file field of an upload form submission.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Filename as supplied by the client, unsanitized.
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadRequest {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Content type to store the object with.
    pub fn content_type_or_default(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or("application/octet-stream")
    }
}

/// Where an uploaded file ended up: `(bucket, sanitized key)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObjectReference {
    pub bucket: String,
    pub key: String,
}

impl StoredObjectReference {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}
