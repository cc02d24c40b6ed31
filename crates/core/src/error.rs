//! Domain error model.

use thiserror::Error;

/// Result type used by the boundary conversions in this crate.
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised while converting raw input into domain values.
///
/// Split and balance failures have their own error types in the crates that
/// own those computations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed decimal input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
