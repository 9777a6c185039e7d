//! Simulated image analysis service.
//!
//! Answers `POST /` with the same success/failure envelope as the real
//! classifier, choosing the outcome at random. Exposed as a library so the
//! binary and the integration tests (including other crates' tests) build
//! the exact same router.

pub mod config;
pub mod router;
pub mod routes;
pub mod simulator;
pub mod state;
