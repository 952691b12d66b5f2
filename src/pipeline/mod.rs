//! End-to-end processing of an upload batch.

mod orchestrator;

pub use orchestrator::PipelineOrchestrator;
