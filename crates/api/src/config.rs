use vislog_core::error::ConfigError;

use crate::simulator::DEFAULT_FAILURE_RATE;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running next to the worker on one
/// machine.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Share of requests answered with a failure envelope (default: `0.2`).
    pub failure_rate: f64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var        | Default   |
    /// |----------------|-----------|
    /// | `HOST`         | `0.0.0.0` |
    /// | `PORT`         | `8000`    |
    /// | `FAILURE_RATE` | `0.2`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match lookup("PORT") {
            None => 8000,
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: "PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
        };

        let failure_rate = match lookup("FAILURE_RATE") {
            None => DEFAULT_FAILURE_RATE,
            Some(raw) => raw.parse().map_err(|e: std::num::ParseFloatError| {
                ConfigError::InvalidValue {
                    key: "FAILURE_RATE",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
        };

        Ok(Self {
            host,
            port,
            failure_rate,
        })
    }
}
