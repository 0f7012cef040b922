//! Test helpers: build AppState and router for integration tests.
//!
//! Storage is in memory and the gateway is either a static endpoint pointing at a
//! `mockito` server or a scripted directory listing, so no AWS account is needed.
//! Run with `cargo test -p imgvoice-api`.

#![allow(dead_code)]

pub mod doubles;

use axum_test::TestServer;
use imgvoice_api::services::ProcessingPipeline;
use imgvoice_api::setup::routes;
use imgvoice_api::state::AppState;
use imgvoice_core::{Config, PipelineConfig};
use imgvoice_gateway::{EndpointResolver, ProcessingClient, StaticEndpointResolver};
use imgvoice_storage::Storage;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub use doubles::{
    FailingStorage, FakeDirectory, GatedStorage, RecordingStorage, SlowStorage,
};

pub const TEST_BUCKET: &str = "input-images";

/// Build a config from explicit variables on top of the test defaults.
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("S3_BUCKET".to_string(), TEST_BUCKET.to_string()),
        ("GATEWAY_STAGE".to_string(), "prod".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = PipelineConfig::from_vars(|key| vars.get(key).cloned())
        .expect("test configuration should be valid");
    Config(Box::new(config))
}

pub fn build_server(
    config: Config,
    storage: Arc<dyn Storage>,
    resolver: Arc<dyn EndpointResolver>,
) -> TestServer {
    let client =
        ProcessingClient::new(Duration::from_secs(5)).expect("Failed to build processing client");
    let pipeline = ProcessingPipeline::new(&config, storage, resolver, client);
    let state = Arc::new(AppState::new(config.clone(), pipeline));

    let router = routes::setup_routes(&config, state);
    TestServer::new(router).expect("Failed to start test server")
}

/// Server whose gateway resolves to `{processing_url}/prod`.
pub fn test_app(
    config: Config,
    storage: Arc<dyn Storage>,
    processing_url: &str,
) -> TestServer {
    build_server(
        config,
        storage,
        Arc::new(StaticEndpointResolver::new(processing_url)),
    )
}
