// Error types for record construction

use thiserror::Error;

/// Errors raised while building a [`Record`](crate::Record) from external data.
///
/// Validation itself never fails; rule violations are reported as messages
/// in a [`Report`](crate::Report).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Failed to parse record: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::ParseError(e.to_string())
    }
}
