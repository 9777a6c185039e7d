//! Scoped database connections.
//!
//! A [`ConnectionScope`] owns exactly one [`MySqlConnection`]. The normal
//! path ends with [`ConnectionScope::release`], which closes the session
//! gracefully; on every other path (error, early return, panic unwind)
//! dropping the scope drops the connection, which closes its socket.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use vislog_core::config::DbConfig;

use crate::error::ConnectionError;

/// Build driver options from a validated config. An unset port falls back
/// to the driver default (3306).
pub fn connect_options(config: &DbConfig) -> MySqlConnectOptions {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database);

    match config.port {
        Some(port) => options.port(port),
        None => options,
    }
}

/// Human-readable connection target with the password left out.
pub fn describe_target(config: &DbConfig) -> String {
    match config.port {
        Some(port) => format!(
            "mysql://{}@{}:{}/{}",
            config.user, config.host, port, config.database
        ),
        None => format!("mysql://{}@{}/{}", config.user, config.host, config.database),
    }
}

/// One connection, held for the duration of one logical operation.
pub struct ConnectionScope {
    conn: MySqlConnection,
}

impl ConnectionScope {
    /// Open a connection. Failure is returned, not logged-and-swallowed.
    pub async fn acquire(config: &DbConfig) -> Result<Self, ConnectionError> {
        let conn = connect_options(config)
            .connect()
            .await
            .map_err(|source| ConnectionError {
                target: describe_target(config),
                source,
            })?;

        tracing::debug!(
            host = %config.host,
            database = %config.database,
            "Database connection opened"
        );
        Ok(Self { conn })
    }

    pub fn connection(&mut self) -> &mut MySqlConnection {
        &mut self.conn
    }

    /// Close the connection. Best-effort: a failed close is reported and
    /// otherwise ignored.
    pub async fn release(self) {
        match self.conn.close().await {
            Ok(()) => tracing::debug!("Database connection closed"),
            Err(e) => tracing::warn!(error = %e, "Failed to close database connection cleanly"),
        }
    }
}
