use thiserror::Error;

use crate::value::ValueKind;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unexpected value kind: expected {expected}, got {actual}")]
    UnexpectedKind { expected: ValueKind, actual: ValueKind },

    #[error("number {0} has no finite representation")]
    NonFiniteNumber(String),
}

/// Convenience alias for type results.
pub type TypeResult<T> = Result<T, TypeError>;
