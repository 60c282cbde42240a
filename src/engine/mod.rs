mod pipeline;

pub use pipeline::{EnhancePipeline, PipelineOutcome};
