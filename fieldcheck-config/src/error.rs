// Error types for rule-set and settings loading

use fieldcheck_validation::RecordError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid rule set: {0}")]
    InvalidRuleSet(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("Invalid setting {key}: {value}")]
    InvalidSetting { key: String, value: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
