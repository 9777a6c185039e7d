//! Service doubles and HTTP helpers shared by the pipeline integration
//! tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use vislog_client::{AnalysisService, ServiceCallError};
use vislog_core::analysis::AnalysisResult;

// ---------------------------------------------------------------------------
// Analysis service
// ---------------------------------------------------------------------------

/// Service double answering every call the same way.
pub struct CannedService {
    outcome: Canned,
    calls: AtomicUsize,
}

enum Canned {
    Respond(AnalysisResult),
    Status(u16, &'static str),
}

impl CannedService {
    pub fn responding(result: AnalysisResult) -> Self {
        Self {
            outcome: Canned::Respond(result),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_with_status(status: u16, body: &'static str) -> Self {
        Self {
            outcome: Canned::Status(status, body),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisService for CannedService {
    async fn analyze(&self, _image_path: &str) -> Result<AnalysisResult, ServiceCallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Canned::Respond(result) => Ok(result.clone()),
            Canned::Status(status, body) => Err(ServiceCallError::Status {
                status: *status,
                body: body.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// A base URL with nothing listening behind it.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
