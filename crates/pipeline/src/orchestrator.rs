//! One analysis attempt, end to end.
//!
//! ```text
//! Started -> CallingService -> Succeeded     -> Logged -> Done
//!                           \-> ServiceFailed -/
//! ```
//!
//! Every attempt that can open a database connection leaves exactly one row
//! in `ai_analysis_log`. Service failures (refused, timeout, bad status,
//! malformed body) become a failed [`AnalysisResult`]; only
//! [`ConnectionError`] reaches the caller.

use chrono::Utc;
use vislog_client::AnalysisService;
use vislog_core::analysis::AnalysisResult;
use vislog_db::models::analysis_log::CreateAnalysisLog;
use vislog_db::{ConnectionError, LogConnection, LogStore};

use crate::logger::AnalysisLogger;

/// Prefix of the message stored for attempts that got no response.
const CALL_FAILURE_PREFIX: &str = "API request error";

// ---------------------------------------------------------------------------
// AttemptState
// ---------------------------------------------------------------------------

/// Progress of a single orchestration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Started,
    CallingService,
    /// The service returned an envelope, which may itself report failure.
    Succeeded,
    /// No usable envelope was obtained.
    ServiceFailed,
    Logged,
    Done,
}

impl AttemptState {
    /// Whether `next` directly follows `self`.
    pub fn can_advance_to(self, next: AttemptState) -> bool {
        use AttemptState::*;
        matches!(
            (self, next),
            (Started, CallingService)
                | (CallingService, Succeeded)
                | (CallingService, ServiceFailed)
                | (Succeeded, Logged)
                | (ServiceFailed, Logged)
                | (Logged, Done)
        )
    }
}

/// Tracks and traces the state of one attempt.
struct Attempt<'a> {
    image_path: &'a str,
    state: AttemptState,
}

impl<'a> Attempt<'a> {
    fn start(image_path: &'a str) -> Self {
        Self {
            image_path,
            state: AttemptState::Started,
        }
    }

    fn advance(&mut self, next: AttemptState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {:?} -> {next:?}",
            self.state
        );
        tracing::debug!(
            image_path = self.image_path,
            from = ?self.state,
            to = ?next,
            "Analysis attempt state change"
        );
        self.state = next;
    }
}

// ---------------------------------------------------------------------------
// AnalysisOrchestrator
// ---------------------------------------------------------------------------

/// Composes the analysis service, the log store, and the logger.
///
/// Attempts are independent: no state is carried from one call of
/// [`analyze`](Self::analyze) to the next, and each opens its own
/// connection.
pub struct AnalysisOrchestrator<S, L> {
    service: S,
    store: L,
    logger: AnalysisLogger,
}

impl<S, L> AnalysisOrchestrator<S, L>
where
    S: AnalysisService,
    L: LogStore,
{
    pub fn new(service: S, store: L) -> Self {
        Self {
            service,
            store,
            logger: AnalysisLogger,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn store(&self) -> &L {
        &self.store
    }

    /// Analyze `image_path` and record the attempt.
    ///
    /// A service answer is returned unchanged. A failed call is returned as
    /// `{success: false, message: <cause>, estimated_data: {}}`. Errors only
    /// when no database connection could be opened to record the attempt.
    pub async fn analyze(&self, image_path: &str) -> Result<AnalysisResult, ConnectionError> {
        let mut attempt = Attempt::start(image_path);
        let request_timestamp = Utc::now();

        attempt.advance(AttemptState::CallingService);
        let (result, record) = match self.service.analyze(image_path).await {
            Ok(result) => {
                let response_timestamp = Utc::now();
                attempt.advance(AttemptState::Succeeded);
                let record = CreateAnalysisLog::from_response(
                    image_path,
                    &result,
                    request_timestamp,
                    response_timestamp,
                );
                (result, record)
            }
            Err(e) => {
                attempt.advance(AttemptState::ServiceFailed);
                tracing::error!(image_path, error = %e, "Analysis request failed");
                let cause = e.to_string();
                let record = CreateAnalysisLog::from_call_failure(
                    image_path,
                    format!("{CALL_FAILURE_PREFIX}: {cause}"),
                    request_timestamp,
                );
                (AnalysisResult::failure(cause), record)
            }
        };

        self.write_log(&record).await?;
        attempt.advance(AttemptState::Logged);

        attempt.advance(AttemptState::Done);
        Ok(result)
    }

    /// Open a scoped connection, write `record`, release the connection.
    async fn write_log(&self, record: &CreateAnalysisLog) -> Result<(), ConnectionError> {
        let mut conn = self.store.acquire().await.map_err(|e| {
            tracing::error!(
                error = %e,
                image_path = %record.image_path,
                "Database connection error"
            );
            e
        })?;

        self.logger.record(&mut conn, record).await;
        conn.release().await;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
