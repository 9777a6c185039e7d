//! Log store abstraction.
//!
//! The analysis pipeline only needs two things from persistence: open a
//! scoped connection, and write one record through it. [`LogStore`] and
//! [`LogConnection`] capture exactly that, with [`MySqlLogStore`] as the
//! production implementation.

use async_trait::async_trait;
use vislog_core::config::DbConfig;
use vislog_core::types::DbId;

use crate::error::{ConnectionError, PersistenceWriteError};
use crate::models::analysis_log::CreateAnalysisLog;
use crate::repositories::AnalysisLogRepo;
use crate::scope::ConnectionScope;

/// Source of scoped connections to the audit log.
#[async_trait]
pub trait LogStore: Send + Sync {
    type Connection: LogConnection;

    /// Open a fresh connection for one analysis attempt.
    async fn acquire(&self) -> Result<Self::Connection, ConnectionError>;
}

/// A connection able to append analysis log records.
#[async_trait]
pub trait LogConnection: Send {
    /// Insert and commit one record.
    async fn insert_log(
        &mut self,
        record: &CreateAnalysisLog,
    ) -> Result<DbId, PersistenceWriteError>;

    /// Close the connection. Never fails.
    async fn release(self);
}

// ---------------------------------------------------------------------------
// MySQL implementation
// ---------------------------------------------------------------------------

/// Opens a new MySQL connection per attempt from a validated config.
#[derive(Debug, Clone)]
pub struct MySqlLogStore {
    config: DbConfig,
}

impl MySqlLogStore {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LogStore for MySqlLogStore {
    type Connection = ConnectionScope;

    async fn acquire(&self) -> Result<ConnectionScope, ConnectionError> {
        ConnectionScope::acquire(&self.config).await
    }
}

#[async_trait]
impl LogConnection for ConnectionScope {
    async fn insert_log(
        &mut self,
        record: &CreateAnalysisLog,
    ) -> Result<DbId, PersistenceWriteError> {
        AnalysisLogRepo::insert(self.connection(), record).await
    }

    async fn release(self) {
        ConnectionScope::release(self).await
    }
}
