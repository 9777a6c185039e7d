//! MySQL persistence for the `ai_analysis_log` audit table.
//!
//! Every analysis attempt opens its own connection through
//! [`ConnectionScope`], performs one insert + commit via
//! [`AnalysisLogRepo`](repositories::AnalysisLogRepo), and releases the
//! connection. There is no pool.

pub mod error;
#[cfg(feature = "testing")]
pub mod memory;
pub mod models;
pub mod repositories;
pub mod scope;
pub mod store;

use sqlx::mysql::MySqlConnection;

pub use error::{ConnectionError, PersistenceWriteError};
#[cfg(feature = "testing")]
pub use memory::{MemoryConnection, MemoryLogStore};
pub use scope::ConnectionScope;
pub use store::{LogConnection, LogStore, MySqlLogStore};

/// Check that the connection can execute a trivial query.
pub async fn health_check(conn: &mut MySqlConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(conn).await?;
    Ok(())
}

/// Apply the migrations under `db/migrations` (creates `ai_analysis_log`).
pub async fn run_migrations(conn: &mut MySqlConnection) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(conn).await
}
