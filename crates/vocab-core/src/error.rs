//! Error handling for index store operations
//!
//! Both error kinds report caller misuse. A store that returns an error is left
//! exactly as it was before the call, so neither kind needs cleanup.

use crate::Index;
use std::fmt;
use thiserror::Error;

/// Error type for index store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Lookup by an index outside `[0, len)`
    #[error("Index out of range: {index} (store holds {len} values)")]
    IndexOutOfRange { index: Index, len: usize },

    /// Batch deletion named a value that was never interned
    #[error("Value not found: {value}")]
    NotFound {
        /// `Debug` rendering of the offending value
        value: String,
    },
}

impl StoreError {
    /// Create an out-of-range error for `index` against a store of `len` values
    pub fn index_out_of_range(index: Index, len: usize) -> Self {
        StoreError::IndexOutOfRange { index, len }
    }

    /// Create a not-found error naming `value`
    pub fn not_found<Q: fmt::Debug + ?Sized>(value: &Q) -> Self {
        StoreError::NotFound { value: format!("{value:?}") }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            StoreError::IndexOutOfRange { .. } => "index_out_of_range",
            StoreError::NotFound { .. } => "not_found",
        }
    }

    /// Check if the store is still usable after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::IndexOutOfRange { .. } => true,
            StoreError::NotFound { .. } => true, // Batch is all-or-nothing
        }
    }
}

/// Result type for index store operations
pub type Result<T> = std::result::Result<T, StoreError>;
