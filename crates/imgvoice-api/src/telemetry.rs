use anyhow::Context;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "imgvoice=debug,tower_http=debug";

/// Initialize the global tracing subscriber.
///
/// `log_format` is `compact` for console use or `json` for log shippers. `RUST_LOG`
/// overrides the default filter.
pub fn init_telemetry(log_format: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);

    if log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()
            .context("Failed to install JSON tracing subscriber")?;
    } else {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        registry
            .with(console_fmt)
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }

    tracing::debug!(log_format = %log_format, "Tracing initialized");
    Ok(())
}
