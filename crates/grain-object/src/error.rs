use thiserror::Error;

/// Errors produced by object operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObjectError {
    #[error("invalid object name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Result alias for object operations.
pub type ObjectResult<T> = Result<T, ObjectError>;
