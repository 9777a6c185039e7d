//! Audit record writer.
//!
//! [`AnalysisLogger`] is the only writer to `ai_analysis_log`. A failed
//! write is reported through `tracing` and then dropped: losing one audit
//! row must never cost the caller the analysis outcome itself.

use vislog_db::models::analysis_log::CreateAnalysisLog;
use vislog_db::LogConnection;

/// Writes one analysis log record per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisLogger;

impl AnalysisLogger {
    /// Insert and commit `record` on `conn`.
    ///
    /// Never fails. Persistence errors are logged at `error` level with the
    /// image path and swallowed.
    pub async fn record<C: LogConnection>(&self, conn: &mut C, record: &CreateAnalysisLog) {
        match conn.insert_log(record).await {
            Ok(id) => {
                tracing::info!(
                    id,
                    image_path = %record.image_path,
                    success = record.success,
                    "Analysis log saved"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    image_path = %record.image_path,
                    "Failed to save analysis log"
                );
            }
        }
    }
}
