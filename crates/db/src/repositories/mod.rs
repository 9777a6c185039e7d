//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&mut MySqlConnection` as the first argument.

pub mod analysis_log_repo;

pub use analysis_log_repo::AnalysisLogRepo;
