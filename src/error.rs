//! Error types for u-collections.
//!
//! Absent keys are reported as `None`, never as an error. Every variant
//! here is a local, fail-fast condition raised by the structure that
//! detected it.

use thiserror::Error;

/// Result type alias using [`CollectionError`].
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Errors raised by collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A parameter or input is outside what the structure accepts.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Pop, peek, dequeue or extract on an empty container.
    #[error("{0} is empty")]
    EmptyCollection(&'static str),

    /// Positional access past the current size.
    #[error("Index out of bounds: {index} (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Grid coordinates outside the configured dimensions.
    #[error("Invalid position ({row},{col}) for {rows}x{cols} grid")]
    PositionOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl CollectionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
