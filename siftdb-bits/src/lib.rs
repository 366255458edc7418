//! Packed bit-vector index sets.
//!
//! A [`BitVector`] is a fixed-capacity set of row indices stored one bit per
//! row: row `i` lives at bit `i % 64` of word `i / 64`, LSB-first. It is the
//! currency passed between the scan kernels (which fill it), the boolean
//! combinators (which merge it), and the page enumerator (which turns it back
//! into row indices).
//!
//! # Bit manipulation tricks
//!
//! ```text
//! (index >> 6)            is (index / 64)
//! (index & 63)            is (index % 64)
//! (1u64 << (index & 63))  is a word with only the (index % 64) bit set
//! ((length + 63) >> 6)    is the word count for `length` rows, rounded up
//! block & (block - 1)     clears the lowest set bit of a word
//! ```
//!
//! # Invariant
//!
//! Every bit at index >= capacity is zero. All mutating operations preserve
//! it; `all` and `not` re-establish it by masking the final word.

mod bit_vector;
mod page;

pub mod error;

pub use bit_vector::BitVector;
pub use error::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
