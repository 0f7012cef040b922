//! Request-scoped domain models. Nothing here is persisted by the application.

pub mod gateway;
pub mod processing;
pub mod upload;

pub use gateway::GatewayEndpoint;
pub use processing::{ProcessingRequest, ProcessingResult};
pub use upload::{StoredObjectReference, UploadRequest};
