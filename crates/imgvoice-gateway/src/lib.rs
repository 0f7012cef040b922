//! imgvoice Gateway Library
//!
//! Locates the processing service behind a named, staged API gateway and forwards
//! stored-object references to it.
//!
//! - [`DirectoryResolver`] scans a [`GatewayDirectory`] (the AWS control plane in
//!   production) for an exact name match.
//! - [`StaticEndpointResolver`] skips the control plane and uses a configured base URL.
//! - [`ProcessingClient`] posts the JSON payload and reports the raw outcome.

#[cfg(feature = "control-plane-aws")]
pub mod aws;
pub mod directory;
pub mod error;
pub mod processing;
pub mod resolver;

#[cfg(feature = "control-plane-aws")]
pub use aws::ApiGatewayDirectory;
pub use directory::{GatewayDirectory, GatewayPage, GatewaySummary};
pub use error::{GatewayError, GatewayResult};
pub use processing::ProcessingClient;
pub use resolver::{DirectoryResolver, EndpointResolver, StaticEndpointResolver};
