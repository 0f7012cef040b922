//! imgvoice Core Library
//!
//! This crate provides the configuration, error types, domain models and filename
//! validation shared by the storage, gateway and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, PipelineConfig, PipelineMode};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    GatewayEndpoint, ProcessingRequest, ProcessingResult, StoredObjectReference, UploadRequest,
};
pub use storage_types::StorageBackend;
// Note: Storage and StorageError live in imgvoice-storage, GatewayError in imgvoice-gateway.
