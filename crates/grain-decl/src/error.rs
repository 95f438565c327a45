use thiserror::Error;

/// Errors produced while interpreting declaration-tree nodes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclError {
    /// A literal token does not follow Java literal syntax.
    #[error("malformed literal {token:?}: {reason}")]
    MalformedLiteral { token: String, reason: String },
}

/// Result alias for declaration operations.
pub type DeclResult<T> = Result<T, DeclError>;

pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> DeclError {
    DeclError::MalformedLiteral {
        token: token.to_string(),
        reason: reason.into(),
    }
}
