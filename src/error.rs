//! Error type shared by every module.

use thiserror::Error;

/// Errors raised while building instances or validating configurations.
///
/// Search itself never fails: budget exhaustion and bound convergence are
/// normal termination paths reported through [`StopReason`](crate::StopReason).
#[derive(Debug, Error)]
pub enum ScpError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("element {element} is not covered by any set")]
    UncoverableElement { element: usize },

    #[error("set {set} has non-positive or non-finite cost {cost}")]
    NonPositiveCost { set: usize, cost: f64 },

    #[error("instance must have at least one element and one set")]
    EmptyInstance,

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScpError>;

impl ScpError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ScpError::InvalidConfig(message.into())
    }
}
