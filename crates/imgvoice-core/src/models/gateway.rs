use std::fmt::{Display, Formatter, Result as FmtResult};

/// Resolved invocation base URL of a staged API gateway.
///
/// Derived per request and discarded after use; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEndpoint {
    base_url: String,
}

impl GatewayEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL of a REST API deployed on AWS API Gateway.
    pub fn execute_api(api_id: &str, region: &str, stage: &str) -> Self {
        Self::new(format!(
            "https://{}.execute-api.{}.amazonaws.com/{}",
            api_id, region, stage
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append a sub-path such as `/rekognition-polly`.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Display for GatewayEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.base_url)
    }
}
