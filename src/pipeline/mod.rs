pub mod batch;
pub mod processor;

pub use batch::BatchProcessor;
pub use processor::{ProcessingError, ProcessingMetrics, ProfilePipeline, RunSummary};
