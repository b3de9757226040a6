//! Error types for tracker mutations and persistence.
//!
//! The surface is intentionally small: out-of-range numeric input is
//! clamped (never an error), and only grooming mutations referencing an
//! unknown task id surface `TaskNotFound`. Storage failures are logged at
//! the mutation site rather than propagated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Unknown task id: {0}")]
    TaskNotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse stored state: {0}")]
    Parse(String),
}

impl TrackerError {
    /// Returns true if this error indicates a bad caller-supplied id
    /// rather than a storage fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::TaskNotFound(_))
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Parse(err.to_string())
    }
}
