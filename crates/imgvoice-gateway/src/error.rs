use thiserror::Error;

/// Failures while locating or calling the processing service
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("API Gateway '{name}' not found.")]
    NotFound { name: String },

    #[error("Control plane request failed: {0}")]
    ControlPlane(String),

    #[error("Request to processing service failed: {0}")]
    Transport(String),

    /// Names the collaborator that did not answer in time.
    #[error("Timed out waiting for {0}")]
    Timeout(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
