use async_trait::async_trait;

use crate::GatewayResult;

/// A registered REST API as listed by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySummary {
    pub id: String,
    pub name: String,
}

impl GatewaySummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One page of a gateway listing.
#[derive(Debug, Clone, Default)]
pub struct GatewayPage {
    pub items: Vec<GatewaySummary>,
    /// Continuation token for the next page, if any.
    pub position: Option<String>,
}

/// Paginated listing of the REST APIs registered in one region.
#[async_trait]
pub trait GatewayDirectory: Send + Sync {
    async fn list_page(&self, position: Option<String>) -> GatewayResult<GatewayPage>;

    /// Region the listed gateways are deployed in.
    fn region(&self) -> &str;
}
