//! AWS API Gateway control plane directory

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_apigateway::error::{DisplayErrorContext, SdkError};
use aws_sdk_apigateway::Client as ApiGatewayClient;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::directory::{GatewayDirectory, GatewayPage, GatewaySummary};
use crate::{GatewayError, GatewayResult};

/// Lists REST APIs with `GetRestApis`.
#[derive(Clone)]
pub struct ApiGatewayDirectory {
    client: ApiGatewayClient,
    region: String,
}

impl Debug for ApiGatewayDirectory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ApiGatewayDirectory")
            .field("region", &self.region)
            .finish()
    }
}

impl ApiGatewayDirectory {
    /// Create an API Gateway client for the given region. Each listing call is bounded by
    /// `timeout`.
    pub async fn new(region: &str, timeout: Duration) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build())
            .load()
            .await;

        Self {
            client: ApiGatewayClient::new(&config),
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl GatewayDirectory for ApiGatewayDirectory {
    async fn list_page(&self, position: Option<String>) -> GatewayResult<GatewayPage> {
        let output = self
            .client
            .get_rest_apis()
            .set_position(position)
            .send()
            .await
            .map_err(|e| match e {
                SdkError::TimeoutError(_) => {
                    GatewayError::Timeout("the gateway control plane".to_string())
                }
                other => GatewayError::ControlPlane(DisplayErrorContext(&other).to_string()),
            })?;

        // Entries without a name or id cannot match a lookup and are skipped.
        let items = output
            .items()
            .iter()
            .filter_map(|api| match (api.id(), api.name()) {
                (Some(id), Some(name)) => Some(GatewaySummary::new(id, name)),
                _ => None,
            })
            .collect();

        Ok(GatewayPage {
            items,
            position: output.position().map(String::from),
        })
    }

    fn region(&self) -> &str {
        &self.region
    }
}
