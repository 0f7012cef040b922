//! Route configuration and setup

use crate::handlers;
use crate::middleware::security_headers::{security_headers_middleware, SecurityHeadersConfig};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use imgvoice_core::{Config, PipelineMode};
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Build the router. `/process_file/{filename}` exists only in `deferred` mode.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let mut routes = Router::new()
        .route("/", get(handlers::form::index))
        .route("/upload", post(handlers::upload::upload))
        .route("/health", get(handlers::health::liveness_check));

    if config.mode() == PipelineMode::Deferred {
        routes = routes.route(
            "/process_file/{filename}",
            get(handlers::process::process_file),
        );
    }

    let security_headers_config = Arc::new(SecurityHeadersConfig::new(config.is_production()));

    // One semaphore shared by every route
    let http_concurrency_limit = config.http_concurrency_limit();
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        max_file_size_bytes = config.max_file_size_bytes(),
        "HTTP limits enabled"
    );

    routes
        .layer(GlobalConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_file_size_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ))
        .with_state(state)
}
