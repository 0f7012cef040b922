//! Upload → resolve → forward pipeline
//!
//! Steps run strictly in sequence within one request. Nothing here is retried.

use imgvoice_core::{
    AppError, Config, ProcessingRequest, ProcessingResult, StoredObjectReference, UploadRequest,
};
use imgvoice_gateway::{EndpointResolver, ProcessingClient};
use imgvoice_storage::Storage;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::HttpAppError;

#[derive(Clone)]
pub struct ProcessingPipeline {
    storage: Arc<dyn Storage>,
    resolver: Arc<dyn EndpointResolver>,
    client: ProcessingClient,
    gateway_name: String,
    gateway_stage: String,
    processing_path: String,
    storage_timeout: Duration,
}

impl ProcessingPipeline {
    pub fn new(
        config: &Config,
        storage: Arc<dyn Storage>,
        resolver: Arc<dyn EndpointResolver>,
        client: ProcessingClient,
    ) -> Self {
        Self {
            storage,
            resolver,
            client,
            gateway_name: config.gateway_name().to_string(),
            gateway_stage: config.gateway_stage().to_string(),
            processing_path: config.processing_path().to_string(),
            storage_timeout: config.storage_timeout(),
        }
    }

    /// Store the upload under an already sanitized `key`.
    pub async fn store(
        &self,
        key: &str,
        upload: UploadRequest,
    ) -> Result<StoredObjectReference, HttpAppError> {
        let content_type = upload.content_type_or_default().to_string();

        match tokio::time::timeout(
            self.storage_timeout,
            self.storage.upload(key, &content_type, upload.data),
        )
        .await
        {
            Ok(result) => Ok(result?),
            Err(_) => {
                tracing::warn!(
                    bucket = %self.storage.bucket(),
                    key = %key,
                    timeout_secs = self.storage_timeout.as_secs(),
                    "Storage upload timed out"
                );
                Err(AppError::Timeout("object storage".to_string()).into())
            }
        }
    }

    /// Reference to an object previously stored by this pipeline.
    pub fn reference(&self, key: &str) -> StoredObjectReference {
        StoredObjectReference::new(self.storage.bucket(), key)
    }

    /// Resolve the gateway and hand the stored object to the processing service.
    ///
    /// Only a 200 answer counts as success; any other status becomes a downstream error
    /// carrying the response body.
    pub async fn forward(&self, reference: &StoredObjectReference) -> Result<(), HttpAppError> {
        let start = Instant::now();

        let endpoint = self
            .resolver
            .resolve(&self.gateway_name, &self.gateway_stage)
            .await?;
        let url = endpoint.join(&self.processing_path);

        let result = self
            .client
            .forward(&url, &ProcessingRequest::from(reference))
            .await?;

        match result {
            ProcessingResult::Completed { .. } => {
                tracing::info!(
                    gateway = %self.gateway_name,
                    bucket = %reference.bucket,
                    key = %reference.key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "File processed"
                );
                Ok(())
            }
            ProcessingResult::Rejected { status, body } => {
                Err(AppError::Downstream { status, body }.into())
            }
        }
    }
}
