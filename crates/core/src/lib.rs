//! Shared domain types for the vislog workspace.
//!
//! - [`analysis`]: the wire envelope exchanged with the analysis service.
//! - [`config`]: environment-backed configuration, validated once at startup.
//! - [`error`]: configuration errors.
//! - [`types`]: common type aliases.

pub mod analysis;
pub mod config;
pub mod error;
pub mod types;
