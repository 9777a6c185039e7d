//! HTTP client for the image analysis service.
//!
//! [`AnalysisApi`] performs a single bounded `POST /` per call and maps
//! every way the call can fail onto [`ServiceCallError`]. Consumers depend
//! on the [`AnalysisService`] trait so the transport can be substituted.

pub mod api;

pub use api::{AnalysisApi, AnalysisService, ServiceCallError};
