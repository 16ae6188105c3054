use std::time::Duration;
use thiserror::Error;

/// Failure of a single start/stop call, as reported by the pump API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Map a trait-boundary error to a `CommandError` carrying its display text.
    pub fn from_api(e: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(e.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("snapshot is {behind:?} older than the current status")]
    OutOfOrder { behind: Duration },
}

