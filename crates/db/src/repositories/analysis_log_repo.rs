//! Repository for the `ai_analysis_log` table.

use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use vislog_core::types::DbId;

use crate::error::PersistenceWriteError;
use crate::models::analysis_log::CreateAnalysisLog;

const INSERT_SQL: &str = "\
    INSERT INTO ai_analysis_log \
    (image_path, success, message, `class`, confidence, request_timestamp, response_timestamp) \
    VALUES (?, ?, ?, ?, ?, ?, ?)";

/// Writes to the append-only analysis log. There is no update or delete.
pub struct AnalysisLogRepo;

impl AnalysisLogRepo {
    /// Insert one record in its own transaction and commit immediately.
    ///
    /// Returns the auto-generated row id. If the insert fails the transaction
    /// is rolled back when it is dropped.
    pub async fn insert(
        conn: &mut MySqlConnection,
        input: &CreateAnalysisLog,
    ) -> Result<DbId, PersistenceWriteError> {
        let mut tx = conn.begin().await.map_err(PersistenceWriteError::Begin)?;

        let done = sqlx::query(INSERT_SQL)
            .bind(&input.image_path)
            .bind(input.success)
            .bind(&input.message)
            .bind(input.class)
            .bind(input.confidence)
            .bind(input.request_timestamp)
            .bind(input.response_timestamp)
            .execute(&mut *tx)
            .await
            .map_err(PersistenceWriteError::Insert)?;

        tx.commit().await.map_err(PersistenceWriteError::Commit)?;

        Ok(done.last_insert_id() as DbId)
    }
}
