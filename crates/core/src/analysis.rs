//! Wire envelope exchanged with the image analysis service.
//!
//! The service answers `POST /` with either
//! `{"success": true, "message": "success", "estimated_data": {"class": 3, "confidence": 0.92}}`
//! or `{"success": false, "message": "Error:E50012", "estimated_data": {}}`.
//! [`AnalysisResult::validate`] enforces that shape at the client boundary so
//! everything downstream can rely on it.

use serde::{Deserialize, Serialize};

/// Message the service uses for a successful classification.
pub const SUCCESS_MESSAGE: &str = "success";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A request or response that does not satisfy the envelope contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("image_path must not be empty")]
    EmptyImagePath,

    #[error("successful result is missing estimated_data.{0}")]
    MissingField(&'static str),

    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of `POST /`. The path is an opaque identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub image_path: String,
}

impl AnalysisRequest {
    pub fn new(image_path: impl Into<String>) -> Result<Self, EnvelopeError> {
        let image_path = image_path.into();
        if image_path.is_empty() {
            return Err(EnvelopeError::EmptyImagePath);
        }
        Ok(Self { image_path })
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Classification payload. Both fields are set on success and absent on
/// failure; an absent field is omitted on the wire so a failure serializes
/// as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl EstimatedData {
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.confidence.is_none()
    }
}

/// Typed view of a successful classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub class: i64,
    pub confidence: f64,
}

/// Outcome of one analysis call, as received from the service or
/// synthesized by the caller when the call itself failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub estimated_data: EstimatedData,
}

impl AnalysisResult {
    /// A successful classification with the service's standard message.
    pub fn success(class: i64, confidence: f64) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            estimated_data: EstimatedData {
                class: Some(class),
                confidence: Some(confidence),
            },
        }
    }

    /// A failed analysis carrying `message` and no estimated data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            estimated_data: EstimatedData::default(),
        }
    }

    /// The classification, present only on a successful result carrying
    /// both fields.
    pub fn classification(&self) -> Option<Classification> {
        if !self.success {
            return None;
        }
        match (self.estimated_data.class, self.estimated_data.confidence) {
            (Some(class), Some(confidence)) => Some(Classification { class, confidence }),
            _ => None,
        }
    }

    /// Check the envelope invariant.
    ///
    /// A success must carry `class` and a `confidence` in `[0, 1]`. Stray
    /// fields on a failure are dropped rather than rejected.
    pub fn validate(mut self) -> Result<Self, EnvelopeError> {
        if !self.success {
            self.estimated_data = EstimatedData::default();
            return Ok(self);
        }

        if self.estimated_data.class.is_none() {
            return Err(EnvelopeError::MissingField("class"));
        }
        match self.estimated_data.confidence {
            None => Err(EnvelopeError::MissingField("confidence")),
            Some(c) if !(0.0..=1.0).contains(&c) => Err(EnvelopeError::ConfidenceOutOfRange(c)),
            Some(_) => Ok(self),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_success_envelope() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "success": true,
            "message": "success",
            "estimated_data": {"class": 3, "confidence": 0.92}
        }))
        .unwrap();

        assert_eq!(result, AnalysisResult::success(3, 0.92));
        assert_eq!(
            result.classification(),
            Some(Classification {
                class: 3,
                confidence: 0.92
            })
        );
    }

    #[test]
    fn parses_failure_envelope() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "success": false,
            "message": "Error:E50012",
            "estimated_data": {}
        }))
        .unwrap();

        assert_eq!(result, AnalysisResult::failure("Error:E50012"));
        assert!(result.classification().is_none());
    }

    #[test]
    fn failure_serializes_empty_estimated_data() {
        let value = serde_json::to_value(AnalysisResult::failure("boom")).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "message": "boom", "estimated_data": {}})
        );
    }

    #[test]
    fn missing_message_and_data_default() {
        let result: AnalysisResult = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(result.message, "");
        assert!(result.estimated_data.is_empty());
    }

    #[test]
    fn validate_rejects_success_without_class() {
        let result = AnalysisResult {
            success: true,
            message: "success".into(),
            estimated_data: EstimatedData {
                class: None,
                confidence: Some(0.8),
            },
        };
        assert_matches!(result.validate(), Err(EnvelopeError::MissingField("class")));
    }

    #[test]
    fn validate_rejects_success_without_confidence() {
        let result = AnalysisResult {
            success: true,
            message: "success".into(),
            estimated_data: EstimatedData {
                class: Some(1),
                confidence: None,
            },
        };
        assert_matches!(
            result.validate(),
            Err(EnvelopeError::MissingField("confidence"))
        );
    }

    #[test]
    fn validate_rejects_out_of_range_confidence() {
        let result = AnalysisResult::success(2, 1.5);
        assert_matches!(
            result.validate(),
            Err(EnvelopeError::ConfidenceOutOfRange(c)) if c == 1.5
        );
    }

    #[test]
    fn validate_strips_data_from_failure() {
        let result = AnalysisResult {
            success: false,
            message: "Error:E50012".into(),
            estimated_data: EstimatedData {
                class: Some(4),
                confidence: None,
            },
        };
        let validated = result.validate().unwrap();
        assert!(validated.estimated_data.is_empty());
        assert_eq!(validated.message, "Error:E50012");
    }

    #[test]
    fn request_rejects_empty_path() {
        assert_matches!(AnalysisRequest::new(""), Err(EnvelopeError::EmptyImagePath));
        assert_eq!(
            AnalysisRequest::new("/a/b.jpg").unwrap().image_path,
            "/a/b.jpg"
        );
    }
}
