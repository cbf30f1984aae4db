//! Error types for the fieldcheck CLI.

use fieldcheck_config::ConfigError;
use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// Rule file or settings could not be loaded
    Config(String),

    /// Record file could not be loaded
    Record(String),

    /// Report could not be rendered
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Record(msg) => write!(f, "Record error: {}", msg),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::InvalidRecord(e) => CliError::Record(e.to_string()),
            other => CliError::Config(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
