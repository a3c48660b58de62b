//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent failures of a sequence operation itself.
/// These are independent of configuration and CLI concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{operation}: sequence is empty")]
    EmptySequence { operation: &'static str },

    #[error("invalid decimal '{input}': {reason}")]
    InvalidDecimal { input: String, reason: String },

    #[error("{operation}: arithmetic overflow")]
    Overflow { operation: &'static str },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Explicit presence check for optional results.
///
/// Turns the `None` of an empty-input query into `EmptySequence`.
pub fn require<T>(value: Option<T>, operation: &'static str) -> DomainResult<T> {
    value.ok_or(DomainError::EmptySequence { operation })
}
