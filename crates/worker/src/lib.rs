//! `vislog-worker` library crate.
//!
//! Holds the batch loop so it can be tested without a database or a live
//! analysis service. The binary entrypoint lives in `main.rs`.

use vislog_client::AnalysisService;
use vislog_db::{ConnectionError, LogStore};
use vislog_pipeline::AnalysisOrchestrator;

/// Image references analyzed by every run.
pub const SAMPLE_IMAGE_PATHS: &[&str] = &[
    "/image/d03f1d36ca69348c51aa/c413eac329e1c0d03/test1.jpg",
    "/image/d03f1d36ca69348c51aa/c413eac329e1c0d03/test2.jpg",
    "/image/d03f1d36ca69348c51aa/c413eac329e1c0d03/test3.jpg",
    "/image/d03f1d36ca69348c51aa/c413eac329e1c0d03/test4.jpg",
    "/image/d03f1d36ca69348c51aa/c413eac329e1c0d03/test5.jpg",
];

/// Env var enabling the schema migration at startup.
pub const RUN_MIGRATIONS_VAR: &str = "DB_RUN_MIGRATIONS";

/// Outcome counts for one batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Analyze each path in order, one attempt at a time.
///
/// Failed analyses are counted and the batch continues. A database
/// connection failure stops the batch, since no further attempt could be
/// recorded either.
pub async fn run_batch<S, L>(
    orchestrator: &AnalysisOrchestrator<S, L>,
    image_paths: &[&str],
) -> Result<BatchSummary, ConnectionError>
where
    S: AnalysisService,
    L: LogStore,
{
    let mut summary = BatchSummary::default();

    for &image_path in image_paths {
        tracing::info!(image_path, "Analyzing image");
        let result = orchestrator.analyze(image_path).await?;

        match result.classification() {
            Some(classification) => {
                summary.succeeded += 1;
                tracing::info!(
                    image_path,
                    class = classification.class,
                    confidence = classification.confidence,
                    "Analysis succeeded"
                );
            }
            None => {
                summary.failed += 1;
                tracing::warn!(image_path, message = %result.message, "Analysis failed");
            }
        }
    }

    Ok(summary)
}

/// Whether `DB_RUN_MIGRATIONS` asks for the schema to be applied.
pub fn migrations_requested<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(RUN_MIGRATIONS_VAR)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
