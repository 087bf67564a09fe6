use std::io;
use std::time::Duration;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AsyncValueError>;

/// Payload of a failed [`AsyncValue`](crate::AsyncValue).
///
/// This is what the producing side hands to [`fail`](crate::AsyncValue::fail),
/// and what every awaiter observes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The producing closure panicked.
    #[error("operation panicked: {0}")]
    Panicked(String),

    /// The producing operation reported a failure.
    #[error("{0}")]
    Message(String),
}

impl ErrorKind {
    /// Builds an [`ErrorKind::Message`] from anything string-like.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Errors surfaced by [`AsyncValue`](crate::AsyncValue) operations.
#[derive(Debug, Error)]
pub enum AsyncValueError {
    /// `complete` or `fail` was called on a value that is already terminal.
    #[error("async value is already in a terminal state")]
    InvalidState,

    /// The value reached the `Failed` state.
    #[error("operation failed: {0}")]
    OperationFailed(ErrorKind),

    /// A bounded wait elapsed before the value became terminal.
    #[error("timed out after {0:?} waiting for async value")]
    Timeout(Duration),

    /// The operating system refused to start the execution context.
    #[error("failed to spawn execution context: {0}")]
    Spawn(#[from] io::Error),
}

impl AsyncValueError {
    /// Returns the failure payload when this error wraps one.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            Self::OperationFailed(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A continuation that panicked while being delivered.
///
/// Failures are isolated: the remaining continuations still run, and each
/// failure is reported on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("continuation #{index} panicked: {message}")]
pub struct ContinuationFailure {
    /// Registration index of the continuation on its value (0-based).
    pub index: usize,

    /// The panic message, when it could be recovered.
    pub message: String,
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
