//! In-memory stand-ins for storage and the gateway control plane.

use async_trait::async_trait;
use bytes::Bytes;
use imgvoice_core::StoredObjectReference;
use imgvoice_gateway::{GatewayDirectory, GatewayPage, GatewayResult, GatewaySummary};
use imgvoice_storage::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

use super::TEST_BUCKET;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Keeps every upload in memory.
#[derive(Default)]
pub struct RecordingStorage {
    uploads: Mutex<Vec<StoredObject>>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> Vec<StoredObject> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredObjectReference> {
        self.uploads.lock().unwrap().push(StoredObject {
            key: key.to_string(),
            content_type: content_type.to_string(),
            data,
        });
        Ok(StoredObjectReference::new(TEST_BUCKET, key))
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Every upload fails.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload(
        &self,
        _key: &str,
        _content_type: &str,
        _data: Bytes,
    ) -> StorageResult<StoredObjectReference> {
        Err(StorageError::UploadFailed("bucket does not exist".to_string()))
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Never finishes within the test storage timeout.
pub struct SlowStorage(pub Duration);

#[async_trait]
impl Storage for SlowStorage {
    async fn upload(
        &self,
        key: &str,
        _content_type: &str,
        _data: Bytes,
    ) -> StorageResult<StoredObjectReference> {
        tokio::time::sleep(self.0).await;
        Ok(StoredObjectReference::new(TEST_BUCKET, key))
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Holds each upload open until [`GatedStorage::release`] is called.
#[derive(Default)]
pub struct GatedStorage {
    entered: Notify,
    released: Notify,
}

impl GatedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves once an upload has reached the backend.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[async_trait]
impl Storage for GatedStorage {
    async fn upload(
        &self,
        key: &str,
        _content_type: &str,
        _data: Bytes,
    ) -> StorageResult<StoredObjectReference> {
        self.entered.notify_one();
        self.released.notified().await;
        Ok(StoredObjectReference::new(TEST_BUCKET, key))
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Control-plane listing served from fixed pages.
pub struct FakeDirectory {
    pages: Vec<Vec<GatewaySummary>>,
}

impl FakeDirectory {
    pub fn new(pages: Vec<Vec<GatewaySummary>>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl GatewayDirectory for FakeDirectory {
    async fn list_page(&self, position: Option<String>) -> GatewayResult<GatewayPage> {
        let index = position
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(0);
        let next = index + 1;
        Ok(GatewayPage {
            items: self.pages.get(index).cloned().unwrap_or_default(),
            position: (next < self.pages.len()).then(|| next.to_string()),
        })
    }

    fn region(&self) -> &str {
        "us-east-1"
    }
}
