//! REST client for the analysis endpoint.
//!
//! Sends `{"image_path": ...}` as a single `POST` to the configured URL and
//! parses the `{success, message, estimated_data}` envelope. No retries.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use vislog_core::analysis::{AnalysisRequest, AnalysisResult, EnvelopeError};
use vislog_core::config::ServiceConfig;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why an analysis call produced no usable result.
#[derive(Debug, thiserror::Error)]
pub enum ServiceCallError {
    /// The request was rejected before anything was sent.
    #[error("Invalid analysis request: {0}")]
    InvalidRequest(#[source] EnvelopeError),

    /// The service could not be reached (refused, DNS, TLS, reset).
    #[error("Connection error: {}", error_chain(.0))]
    Connect(#[source] reqwest::Error),

    /// No complete response arrived within the configured bound.
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Any other transport-level failure.
    #[error("HTTP request failed: {}", error_chain(.0))]
    Request(#[source] reqwest::Error),

    /// The service answered with a non-2xx status code.
    #[error("Analysis service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not a JSON analysis envelope.
    #[error("Malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The body parsed but broke the envelope contract.
    #[error("Invalid analysis result: {0}")]
    InvalidResponse(#[source] EnvelopeError),

    /// The HTTP client itself could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Render an error and its causes as `outer: inner: root`, since reqwest
/// keeps the useful detail (e.g. "Connection refused") in the source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

// ---------------------------------------------------------------------------
// Service trait
// ---------------------------------------------------------------------------

/// Anything that can classify an image reference.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, image_path: &str) -> Result<AnalysisResult, ServiceCallError>;
}

// ---------------------------------------------------------------------------
// AnalysisApi
// ---------------------------------------------------------------------------

/// HTTP client for one analysis endpoint. Stateless between calls and safe
/// to reuse.
#[derive(Debug, Clone)]
pub struct AnalysisApi {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
}

impl AnalysisApi {
    /// Create a client from validated service configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceCallError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ServiceCallError::ClientBuild)?;
        Ok(Self::with_client(
            client,
            config.api_url.clone(),
            config.timeout,
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`]. The timeout
    /// is applied per request, so it holds regardless of how `client` was
    /// built.
    pub fn with_client(client: reqwest::Client, api_url: String, timeout: Duration) -> Self {
        Self {
            client,
            api_url,
            timeout,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Submit one image reference for analysis.
    ///
    /// The whole exchange (connect, send, read body) is bounded by the
    /// configured timeout.
    pub async fn analyze(&self, image_path: &str) -> Result<AnalysisResult, ServiceCallError> {
        let request = AnalysisRequest::new(image_path).map_err(ServiceCallError::InvalidRequest)?;

        tracing::debug!(image_path, api_url = %self.api_url, "Sending analysis request");

        let response = self
            .client
            .post(&self.api_url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        let result: AnalysisResult =
            serde_json::from_slice(&body).map_err(ServiceCallError::Decode)?;

        if !result.success && !result.estimated_data.is_empty() {
            tracing::warn!(
                image_path,
                "Failed analysis carried estimated_data; discarding it"
            );
        }

        result.validate().map_err(ServiceCallError::InvalidResponse)
    }

    // ---- private helpers ----

    /// Map a reqwest failure onto the matching error variant.
    fn classify(&self, err: reqwest::Error) -> ServiceCallError {
        if err.is_timeout() {
            ServiceCallError::Timeout(self.timeout)
        } else if err.is_connect() {
            ServiceCallError::Connect(err)
        } else {
            ServiceCallError::Request(err)
        }
    }

    /// Return the response unchanged on a 2xx status, otherwise a
    /// [`ServiceCallError::Status`] with the body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ServiceCallError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ServiceCallError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl AnalysisService for AnalysisApi {
    async fn analyze(&self, image_path: &str) -> Result<AnalysisResult, ServiceCallError> {
        AnalysisApi::analyze(self, image_path).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_configured_endpoint() {
        let api = AnalysisApi::new(&ServiceConfig::default()).unwrap();
        assert_eq!(api.api_url(), "http://localhost:8000/");
        assert_eq!(api.timeout, Duration::from_secs(10));
    }

    #[test]
    fn status_error_display() {
        let err = ServiceCallError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(
            err.to_string(),
            "Analysis service returned HTTP 502: bad gateway"
        );
    }

    #[test]
    fn timeout_error_display() {
        let err = ServiceCallError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Request timed out after 10s");
    }

    #[test]
    fn request_error_display() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = ServiceCallError::Request(req_err);
        assert!(err.to_string().starts_with("HTTP request failed"));
    }
}
