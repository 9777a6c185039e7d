//! In-memory [`LogStore`] for exercising the pipeline without a MySQL server.
//!
//! Enabled by the `testing` feature.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use vislog_core::types::DbId;

use crate::error::{ConnectionError, PersistenceWriteError};
use crate::models::analysis_log::CreateAnalysisLog;
use crate::store::{LogConnection, LogStore};

/// Target reported by connection errors from an exhausted store.
pub const MEMORY_TARGET: &str = "mysql://analyzer@db.invalid/vision";

/// Keeps committed records in memory and counts connection opens and
/// releases.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    records: Arc<Mutex<Vec<CreateAnalysisLog>>>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
    connection_limit: Option<usize>,
    fail_inserts: bool,
}

impl MemoryLogStore {
    /// Connections open normally but every insert fails.
    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    /// Every connection attempt is refused.
    pub fn unreachable() -> Self {
        Self::refusing_after(0)
    }

    /// The first `limit` connections open; later ones are refused.
    pub fn refusing_after(limit: usize) -> Self {
        Self {
            connection_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<CreateAnalysisLog> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    type Connection = MemoryConnection;

    async fn acquire(&self) -> Result<MemoryConnection, ConnectionError> {
        if self
            .connection_limit
            .is_some_and(|limit| self.opened() >= limit)
        {
            return Err(ConnectionError {
                target: MEMORY_TARGET.to_string(),
                source: sqlx::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )),
            });
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryConnection {
            records: Arc::clone(&self.records),
            released: Arc::clone(&self.released),
            fail_inserts: self.fail_inserts,
        })
    }
}

/// Connection handed out by [`MemoryLogStore`].
#[derive(Debug)]
pub struct MemoryConnection {
    records: Arc<Mutex<Vec<CreateAnalysisLog>>>,
    released: Arc<AtomicUsize>,
    fail_inserts: bool,
}

#[async_trait]
impl LogConnection for MemoryConnection {
    async fn insert_log(
        &mut self,
        record: &CreateAnalysisLog,
    ) -> Result<DbId, PersistenceWriteError> {
        if self.fail_inserts {
            return Err(PersistenceWriteError::Insert(sqlx::Error::Protocol(
                "Duplicate entry '1' for key 'PRIMARY'".into(),
            )));
        }

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.push(record.clone());
        Ok(records.len() as DbId)
    }

    async fn release(self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
