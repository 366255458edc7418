//! Predicate scan kernels for dense numeric columns.
//!
//! This crate evaluates comparisons of a column against a scalar (or a second
//! column) 64 rows at a time and merges the result into a packed
//! [`BitVector`] under a boolean combinator. On AVX2 hardware the 8- and
//! 16-bit kernels compare 32-64 lanes per instruction and sustain on the
//! order of 12 GB/s per core; every path falls back to a scalar reference
//! kernel that defines the authoritative, bit-for-bit semantics.
//!
//! # Layout
//!
//! - [`scan::Scanner`] - validated entry points `scan` / `scan_pair`, lane
//!   dispatch via the sealed [`scan::ScanLane`] trait.
//! - `scalar` (internal) - reference kernels: 64-row word accumulator, one
//!   combine per word.
//! - `simd` - AVX2 kernels for 1- and 2-byte lanes, the PEXT bit-pack, and
//!   the runtime CPU feature probe ([`supports_simd`]).
//! - [`mod@bucket`] - branchless ordered-bucket classification for
//!   sort/group-by acceleration.
//! - [`types`] - wire-stable operator enumerations and lane type tags.
//!
//! # Example
//!
//! ```
//! use siftdb_bits::BitVector;
//! use siftdb_scan::{BooleanOp, CompareOp, Scanner};
//!
//! let column: Vec<i8> = vec![0, 1, 2, 3, 4, 5, 6, 7];
//! let mut matches = BitVector::new(64);
//!
//! let scanner = Scanner::new();
//! scanner
//!     .scan_all(&column, CompareOp::GreaterThan, 3, BooleanOp::Set, &mut matches)
//!     .unwrap();
//!
//! assert_eq!(matches.count(), 4);
//! assert_eq!(matches.as_words()[0], 0xF0);
//! ```
//!
//! # Concurrency
//!
//! Kernels are pure functions over borrowed columns and an exclusively
//! borrowed target word range; independent calls may run in parallel as long
//! as their target ranges do not overlap. Nothing here blocks or allocates
//! beyond bit-vector construction.

pub mod bucket;
pub mod config;
pub mod error;
pub mod scan;
pub mod types;

mod ops;
mod scalar;
mod simd;

pub use bucket::{bucket, bucket_index, BucketMap};
pub use config::{EngineConfig, SimdMode};
pub use error::Error;
pub use scan::{ScanLane, Scanner};
pub use simd::dispatch::{cpu_features, supports_simd, CpuFeatures};
pub use types::{BooleanOp, CompareOp, LaneType};

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

// The bit-vector crate is the other half of the public surface; re-export it
// so integrators depend on one crate.
pub use siftdb_bits as bits;
pub use siftdb_bits::BitVector;
