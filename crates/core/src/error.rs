/// Errors raised while resolving configuration from the environment.
///
/// Always fatal: the process aborts before any analysis is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {key} is not set")]
    Missing { key: &'static str },

    #[error("Environment variable {key} has invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    /// Name of the offending environment variable.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigError::Missing { key } | ConfigError::InvalidValue { key, .. } => key,
        }
    }
}
