//! Application state shared by all handlers.
//!
//! Built once at startup and read-only afterwards.

use imgvoice_core::Config;

use crate::services::ProcessingPipeline;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: ProcessingPipeline,
}

impl AppState {
    pub fn new(config: Config, pipeline: ProcessingPipeline) -> Self {
        Self { config, pipeline }
    }
}
