//! Environment-backed configuration.
//!
//! Both config types are resolved exactly once at process start and passed
//! down explicitly; nothing here caches or mutates process state. The
//! `from_lookup` constructors take the variable source as a function so the
//! same validation runs against a fixed map in tests.
//!
//! | Env Var                 | Required | Default                  |
//! |-------------------------|----------|--------------------------|
//! | `MYSQL_HOST`            | yes      | --                       |
//! | `MYSQL_PORT`            | no       | caller-supplied or none  |
//! | `MYSQL_USER`            | yes      | --                       |
//! | `MYSQL_PASSWORD`        | yes      | --                       |
//! | `MYSQL_DATABASE`        | yes      | --                       |
//! | `ANALYSIS_API_URL`      | no       | `http://localhost:8000/` |
//! | `ANALYSIS_TIMEOUT_SECS` | no       | `10`                     |

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const MYSQL_HOST: &str = "MYSQL_HOST";
pub const MYSQL_PORT: &str = "MYSQL_PORT";
pub const MYSQL_USER: &str = "MYSQL_USER";
pub const MYSQL_PASSWORD: &str = "MYSQL_PASSWORD";
pub const MYSQL_DATABASE: &str = "MYSQL_DATABASE";

pub const ANALYSIS_API_URL: &str = "ANALYSIS_API_URL";
pub const ANALYSIS_TIMEOUT_SECS: &str = "ANALYSIS_TIMEOUT_SECS";

/// Endpoint of the analysis service when `ANALYSIS_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/";

/// Upper bound on a single analysis call when `ANALYSIS_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// DbConfig
// ---------------------------------------------------------------------------

/// Connection parameters for the MySQL database holding `ai_analysis_log`.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    /// `None` lets the driver use its own default port.
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

impl DbConfig {
    /// Validate the process environment. An unset port stays `None`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), None)
    }

    /// Validate variables supplied by `lookup`.
    ///
    /// Variables are checked in declaration order; the first one that is
    /// missing (or empty) is the one reported, regardless of which others are
    /// present.
    pub fn from_lookup<F>(lookup: F, default_port: Option<u16>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = required(&lookup, MYSQL_HOST)?;
        let port = parse_port(&lookup, MYSQL_PORT)?.or(default_port);
        let user = required(&lookup, MYSQL_USER)?;
        let password = required(&lookup, MYSQL_PASSWORD)?;
        let database = required(&lookup, MYSQL_DATABASE)?;

        Ok(Self {
            host,
            port,
            user,
            password,
            database,
        })
    }
}

// ---------------------------------------------------------------------------
// ServiceConfig
// ---------------------------------------------------------------------------

/// Location of the analysis service and the bound on a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url =
            non_empty(&lookup, ANALYSIS_API_URL).unwrap_or_else(|| DEFAULT_API_URL.into());

        let timeout_secs = match non_empty(&lookup, ANALYSIS_TIMEOUT_SECS) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: ANALYSIS_TIMEOUT_SECS,
                        value: raw,
                        reason: "must be greater than zero".into(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        key: ANALYSIS_TIMEOUT_SECS,
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up `key`, treating an empty value the same as an unset one.
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or(ConfigError::Missing { key })
}

fn parse_port<F>(lookup: &F, key: &'static str) -> Result<Option<u16>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = non_empty(lookup, key) else {
        return Ok(None);
    };

    raw.trim()
        .parse::<u16>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw,
            reason: e.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
