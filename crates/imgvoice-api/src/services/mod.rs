pub mod pipeline;

pub use pipeline::ProcessingPipeline;
