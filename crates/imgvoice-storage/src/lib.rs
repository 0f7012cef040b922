//! imgvoice Storage Library
//!
//! Storage abstraction for uploaded images, with implementations for S3 and the
//! local filesystem.
//!
//! # Storage key format
//!
//! Keys are flat sanitized filenames placed directly in the configured bucket. Keys
//! must not be empty, contain `..`, path separators, or start with `/`. Key checks are
//! centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use imgvoice_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
