//! Analyze-then-log pipeline.
//!
//! - [`AnalysisOrchestrator`]: the single externally visible operation.
//!   Calls the analysis service, writes exactly one audit record per
//!   attempt, and turns service failures into failed results.
//! - [`AnalysisLogger`]: writes one record and absorbs write failures.

pub mod logger;
pub mod orchestrator;

pub use logger::AnalysisLogger;
pub use orchestrator::{AnalysisOrchestrator, AttemptState};
