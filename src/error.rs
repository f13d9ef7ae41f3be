//! Error types returned by the collections.

use thiserror::Error;

/// Errors returned by [`DynamicArray`] operations.
///
/// [`DynamicArray`]: crate::collections::DynamicArray
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    /// The index was outside the range accepted by the operation.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// Index supplied by the caller.
        index: usize,
        /// Length of the array at the time of the call.
        len: usize,
    },
    /// Attempted to pop from an array with no elements.
    #[error("pop from empty array")]
    Empty,
}

/// Errors returned by [`HashTable`] operations.
///
/// [`HashTable`]: crate::collections::HashTable
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// No entry exists for the requested key.
    #[error("key not found")]
    KeyNotFound,
    /// A table was requested with zero buckets.
    #[error("hash table capacity must be positive")]
    ZeroCapacity,
}
