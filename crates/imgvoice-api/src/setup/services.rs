//! Gateway clients and pipeline wiring

use anyhow::{Context, Result};
use imgvoice_core::Config;
use imgvoice_gateway::{
    ApiGatewayDirectory, DirectoryResolver, EndpointResolver, ProcessingClient,
    StaticEndpointResolver,
};
use imgvoice_storage::Storage;
use std::sync::Arc;

use crate::services::ProcessingPipeline;
use crate::state::AppState;

pub async fn initialize_services(
    config: &Config,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let resolver = setup_resolver(config).await;

    let client = ProcessingClient::new(config.processing_timeout())
        .context("Failed to create processing service client")?;

    let pipeline = ProcessingPipeline::new(config, storage, resolver, client);

    Ok(Arc::new(AppState::new(config.clone(), pipeline)))
}

async fn setup_resolver(config: &Config) -> Arc<dyn EndpointResolver> {
    if let Some(base_url) = config.gateway_base_url() {
        tracing::info!(
            base_url = %base_url,
            stage = %config.gateway_stage(),
            "Using static gateway endpoint; control plane lookups disabled"
        );
        return Arc::new(StaticEndpointResolver::new(base_url));
    }

    let directory =
        ApiGatewayDirectory::new(config.region(), config.control_plane_timeout()).await;
    tracing::info!(
        gateway = %config.gateway_name(),
        stage = %config.gateway_stage(),
        region = %config.region(),
        follow_pages = config.gateway_follow_pages(),
        "Resolving processing endpoint through the API Gateway control plane"
    );
    Arc::new(DirectoryResolver::new(
        directory,
        config.gateway_follow_pages(),
    ))
}
