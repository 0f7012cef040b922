//! Application setup and initialization
//!
//! Clients are built once here and injected into [`AppState`]; nothing is created
//! lazily inside handlers.

pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use imgvoice_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())?;

    tracing::info!(
        environment = %config.environment(),
        mode = %config.mode(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    let state = services::initialize_services(&config, storage).await?;

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
