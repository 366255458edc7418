//! Error types for bit-vector operations.

use thiserror::Error;

/// Errors raised by bit-vector operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("bit vector word lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("length {length} exceeds bit vector capacity {capacity}")]
    LengthOutOfRange { length: usize, capacity: usize },
}
