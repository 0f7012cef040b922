//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. Each variant describes
//! how it is presented to the client through [`ErrorMetadata`]. Validation failures
//! of the upload form are not errors here: the upload handler answers them with a
//! silent redirect.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like invalid input
    Debug,
    /// Warning level - for failures of external collaborators
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from the client
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("API Gateway '{0}' not found.")]
    GatewayNotFound(String),

    #[error("Gateway control plane error: {0}")]
    ControlPlane(String),

    #[error("Processing service returned status {status}: {body}")]
    Downstream { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check the uploaded file and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Storage(_) => (
            502,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Warn,
        ),
        AppError::GatewayNotFound(_) => (
            502,
            "GATEWAY_NOT_FOUND",
            false,
            Some("Check GATEWAY_NAME and the deployment region"),
            false,
            LogLevel::Error,
        ),
        AppError::ControlPlane(_) => (
            502,
            "CONTROL_PLANE_ERROR",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Warn,
        ),
        AppError::Downstream { .. } => (
            502,
            "DOWNSTREAM_ERROR",
            true,
            Some("Retry the upload; contact support if this error persists"),
            false,
            LogLevel::Warn,
        ),
        AppError::Transport(_) => (
            502,
            "TRANSPORT_ERROR",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Warn,
        ),
        AppError::Timeout(_) => (
            504,
            "UPSTREAM_TIMEOUT",
            true,
            Some("Retry after a short delay"),
            false,
            LogLevel::Warn,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Storage(_) => "Storage",
            AppError::GatewayNotFound(_) => "GatewayNotFound",
            AppError::ControlPlane(_) => "ControlPlane",
            AppError::Downstream { .. } => "Downstream",
            AppError::Transport(_) => "Transport",
            AppError::Timeout(_) => "Timeout",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Storage(ref msg) => format!("Failed to store the uploaded file: {}", msg),
            AppError::GatewayNotFound(ref name) => format!("API Gateway '{}' not found.", name),
            AppError::ControlPlane(ref msg) => {
                format!("Failed to look up the processing endpoint: {}", msg)
            }
            // The downstream body is surfaced verbatim, as the processing service is the
            // only party that knows why it refused the file.
            AppError::Downstream { status, body } => {
                format!("Error processing file (status {}): {}", status, body)
            }
            AppError::Transport(ref msg) => {
                format!("Failed to reach the processing service: {}", msg)
            }
            AppError::Timeout(ref what) => format!("Timed out waiting for {}", what),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_downstream() {
        let err = AppError::Downstream {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.error_code(), "DOWNSTREAM_ERROR");
        assert!(err.is_recoverable());
        assert!(err.client_message().contains("not found"));
        assert!(err.client_message().contains("404"));
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_gateway_not_found() {
        let err = AppError::GatewayNotFound("JahnaviAPIGateway".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.error_code(), "GATEWAY_NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(
            err.client_message(),
            "API Gateway 'JahnaviAPIGateway' not found."
        );
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_timeout() {
        let err = AppError::Timeout("object storage".to_string());
        assert_eq!(err.http_status_code(), 504);
        assert_eq!(err.error_code(), "UPSTREAM_TIMEOUT");
        assert_eq!(err.client_message(), "Timed out waiting for object storage");
    }

    #[test]
    fn test_internal_errors_are_sensitive() {
        let err = AppError::from(anyhow::anyhow!("secret detail"));
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Internal server error");
        assert_eq!(err.error_type(), "Internal");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("root cause").context("outer context");
        let err = AppError::InternalWithSource {
            message: "wrapped".to_string(),
            source,
        };
        let details = err.detailed_message();
        assert!(details.contains("Caused by: outer context"));
    }
}
