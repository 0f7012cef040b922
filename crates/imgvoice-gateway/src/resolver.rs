//! Gateway endpoint resolution
//!
//! Resolution happens on every forwarding call; endpoints are never cached, so a
//! redeployed gateway is picked up without a restart.

use async_trait::async_trait;
use imgvoice_core::GatewayEndpoint;
use std::collections::HashSet;

use crate::directory::GatewayDirectory;
use crate::{GatewayError, GatewayResult};

/// Turns a gateway display name and stage into an invocation base URL.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    async fn resolve(&self, name: &str, stage: &str) -> GatewayResult<GatewayEndpoint>;
}

/// Upper bound on listing pages fetched for one resolution.
pub const MAX_LISTING_PAGES: usize = 100;

/// Resolves by scanning a [`GatewayDirectory`] for an exact name match.
pub struct DirectoryResolver<D> {
    directory: D,
    follow_pages: bool,
}

impl<D: GatewayDirectory> DirectoryResolver<D> {
    /// With `follow_pages` false only the first listing page is scanned.
    pub fn new(directory: D, follow_pages: bool) -> Self {
        Self {
            directory,
            follow_pages,
        }
    }
}

#[async_trait]
impl<D: GatewayDirectory> EndpointResolver for DirectoryResolver<D> {
    #[tracing::instrument(skip(self), fields(region = %self.directory.region()))]
    async fn resolve(&self, name: &str, stage: &str) -> GatewayResult<GatewayEndpoint> {
        let mut position = None;
        let mut pages = 0usize;
        let mut seen_positions = HashSet::new();

        loop {
            let page = self.directory.list_page(position.take()).await?;
            pages += 1;

            if let Some(api) = page.items.iter().find(|api| api.name == name) {
                let endpoint =
                    GatewayEndpoint::execute_api(&api.id, self.directory.region(), stage);
                tracing::debug!(
                    gateway = %name,
                    api_id = %api.id,
                    pages = pages,
                    endpoint = %endpoint,
                    "Resolved gateway endpoint"
                );
                return Ok(endpoint);
            }

            match page.position {
                Some(next) if self.follow_pages && !next.is_empty() => {
                    if pages >= MAX_LISTING_PAGES {
                        tracing::warn!(
                            gateway = %name,
                            pages = pages,
                            "Gateway listing page limit reached"
                        );
                        break;
                    }
                    if !seen_positions.insert(next.clone()) {
                        tracing::warn!(
                            gateway = %name,
                            position = %next,
                            "Gateway listing repeated a position token"
                        );
                        break;
                    }
                    position = Some(next);
                }
                _ => break,
            }
        }

        tracing::warn!(gateway = %name, pages = pages, "Gateway not found");
        Err(GatewayError::NotFound {
            name: name.to_string(),
        })
    }
}

/// Fixed base URL, joined with the stage. No control-plane call is made.
#[derive(Debug, Clone)]
pub struct StaticEndpointResolver {
    base: GatewayEndpoint,
}

impl StaticEndpointResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base: GatewayEndpoint::new(base_url),
        }
    }
}

#[async_trait]
impl EndpointResolver for StaticEndpointResolver {
    async fn resolve(&self, _name: &str, stage: &str) -> GatewayResult<GatewayEndpoint> {
        Ok(GatewayEndpoint::new(self.base.join(stage)))
    }
}
