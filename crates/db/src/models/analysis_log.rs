//! Insert DTO for the analysis log.
//!
//! Rows in `ai_analysis_log` are immutable once written; there is no update
//! DTO and no `updated_at` column.

use serde::{Deserialize, Serialize};
use vislog_core::analysis::AnalysisResult;
use vislog_core::types::Timestamp;

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// One audit record for a single analysis attempt.
///
/// `response_timestamp` is `None` when the attempt failed before the service
/// produced a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAnalysisLog {
    pub image_path: String,
    pub success: bool,
    pub message: Option<String>,
    pub class: Option<i64>,
    pub confidence: Option<f64>,
    pub request_timestamp: Timestamp,
    pub response_timestamp: Option<Timestamp>,
}

impl CreateAnalysisLog {
    /// Record for an attempt where the service answered, successfully or not.
    pub fn from_response(
        image_path: impl Into<String>,
        result: &AnalysisResult,
        request_timestamp: Timestamp,
        response_timestamp: Timestamp,
    ) -> Self {
        Self {
            image_path: image_path.into(),
            success: result.success,
            message: Some(result.message.clone()),
            class: result.estimated_data.class,
            confidence: result.estimated_data.confidence,
            request_timestamp,
            response_timestamp: Some(response_timestamp),
        }
    }

    /// Record for an attempt where no response was obtained.
    pub fn from_call_failure(
        image_path: impl Into<String>,
        message: impl Into<String>,
        request_timestamp: Timestamp,
    ) -> Self {
        Self {
            image_path: image_path.into(),
            success: false,
            message: Some(message.into()),
            class: None,
            confidence: None,
            request_timestamp,
            response_timestamp: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
