//! Error types for the scan engine.
//!
//! All variants are argument-domain errors raised at the API boundary before
//! any kernel runs; the target bit vector is untouched when one fires.
//! Missing CPU features are not errors - the dispatcher falls back to the
//! scalar reference path.

use thiserror::Error;

/// Main error type for the scan engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("row range {index}..{end} out of bounds for column of length {length}")]
    RowRangeOutOfBounds {
        index: usize,
        end: usize,
        length: usize,
    },

    #[error("vector index {0} must be a multiple of 64")]
    UnalignedVectorIndex(usize),

    #[error("bit vector of {capacity} bits is too small for rows {index}..{end}")]
    VectorTooSmall {
        capacity: usize,
        index: usize,
        end: usize,
    },

    #[error("bucket boundaries must hold 2 to 257 entries, got {0}")]
    BucketCount(usize),

    #[error("bucket boundaries are not monotonically non-decreasing at entry {0}")]
    UnsortedBoundaries(usize),

    #[error("bucket id output holds {got} rows, need {need}")]
    BucketIdsTooSmall { got: usize, need: usize },

    #[error("bucket count/flag arrays must match boundary count {boundaries}, got {got}")]
    BucketArraysMismatched { boundaries: usize, got: usize },
}
