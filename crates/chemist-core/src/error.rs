use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised by the storage and view layer.
///
/// Every variant signals a violated precondition on the caller's side (a bad index,
/// a view that was never bound to storage, a field that was never assigned), so
/// none of them are meant to be retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChemistError {
    #[error("Attempted to access a field through a null view")]
    NullView,

    #[error("Index {index} is out of range for a collection of {len} elements")]
    OutOfRange { index: usize, len: usize },

    #[error("Optional field '{field}' has not been set")]
    UnsetOptionalField { field: &'static str },

    #[error("Failed to grow field storage: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Contracted Gaussian is not centered on the same point as the basis set")]
    CenterMismatch,

    #[error("Expected {expected} values but found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ChemistError>;
