/// The database could not be reached, so no audit record can be written.
///
/// Propagated to the caller of the orchestrator.
#[derive(Debug, thiserror::Error)]
#[error("Failed to connect to {target}: {source}")]
pub struct ConnectionError {
    /// Redacted connection target, e.g. `mysql://analyzer@db:3306/vision`.
    pub target: String,
    #[source]
    pub source: sqlx::Error,
}

/// Writing a single audit record failed.
///
/// Never propagated past the analysis logger.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceWriteError {
    #[error("Failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    #[error("Failed to insert analysis log: {0}")]
    Insert(#[source] sqlx::Error),

    #[error("Failed to commit analysis log: {0}")]
    Commit(#[source] sqlx::Error),
}
