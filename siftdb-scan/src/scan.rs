//! Scan dispatch: validated entry points and per-lane kernel selection.
//!
//! [`Scanner`] resolves the kernel policy once (CPU probe + configuration),
//! validates every request at the API boundary, then hands the row range and
//! the target word range to the lane's kernel. Operator and combinator
//! selection happens before the hot loops; see `ops` and the `simd` kernels.

use siftdb_bits::BitVector;

use crate::config::{EngineConfig, SimdMode};
use crate::error::Error;
use crate::scalar;
use crate::simd::dispatch::supports_simd;
use crate::types::{BooleanOp, CompareOp, LaneType};
use crate::Result;

#[cfg(target_arch = "x86_64")]
use crate::simd::{scan16, scan8};

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for i8 {}
    impl Sealed for u16 {}
    impl Sealed for i16 {}
    impl Sealed for u32 {}
    impl Sealed for i32 {}
    impl Sealed for u64 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A primitive type the scan kernels understand.
///
/// Implemented for the ten numeric lane types. Boolean columns store one
/// byte per value and scan as `u8`. The 1- and 2-byte lanes route to the
/// AVX2 kernels when available; wider lanes and floats always run the scalar
/// reference kernel, as do column-vs-column scans.
pub trait ScanLane: bytemuck::Pod + PartialOrd + sealed::Sealed {
    /// Logical lane type of this primitive.
    const LANE: LaneType;

    #[doc(hidden)]
    fn scan_value(
        values: &[Self],
        c_op: CompareOp,
        value: Self,
        b_op: BooleanOp,
        words: &mut [u64],
        _use_simd: bool,
    ) {
        scalar::scan_value(values, c_op, value, b_op, words);
    }

    #[doc(hidden)]
    fn scan_pair(
        left: &[Self],
        right: &[Self],
        c_op: CompareOp,
        b_op: BooleanOp,
        words: &mut [u64],
    ) {
        scalar::scan_pair(left, right, c_op, b_op, words);
    }
}

impl ScanLane for u8 {
    const LANE: LaneType = LaneType::U8;

    fn scan_value(
        values: &[Self],
        c_op: CompareOp,
        value: Self,
        b_op: BooleanOp,
        words: &mut [u64],
        use_simd: bool,
    ) {
        #[cfg(target_arch = "x86_64")]
        {
            if use_simd {
                return scan8::scan_unsigned(values, c_op, value, b_op, words);
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        let _ = use_simd;

        scalar::scan_value(values, c_op, value, b_op, words);
    }
}

impl ScanLane for i8 {
    const LANE: LaneType = LaneType::I8;

    fn scan_value(
        values: &[Self],
        c_op: CompareOp,
        value: Self,
        b_op: BooleanOp,
        words: &mut [u64],
        use_simd: bool,
    ) {
        #[cfg(target_arch = "x86_64")]
        {
            if use_simd {
                return scan8::scan_signed(values, c_op, value, b_op, words);
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        let _ = use_simd;

        scalar::scan_value(values, c_op, value, b_op, words);
    }
}

impl ScanLane for u16 {
    const LANE: LaneType = LaneType::U16;

    fn scan_value(
        values: &[Self],
        c_op: CompareOp,
        value: Self,
        b_op: BooleanOp,
        words: &mut [u64],
        use_simd: bool,
    ) {
        #[cfg(target_arch = "x86_64")]
        {
            if use_simd {
                return scan16::scan_unsigned(values, c_op, value, b_op, words);
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        let _ = use_simd;

        scalar::scan_value(values, c_op, value, b_op, words);
    }
}

impl ScanLane for i16 {
    const LANE: LaneType = LaneType::I16;

    fn scan_value(
        values: &[Self],
        c_op: CompareOp,
        value: Self,
        b_op: BooleanOp,
        words: &mut [u64],
        use_simd: bool,
    ) {
        #[cfg(target_arch = "x86_64")]
        {
            if use_simd {
                return scan16::scan_signed(values, c_op, value, b_op, words);
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        let _ = use_simd;

        scalar::scan_value(values, c_op, value, b_op, words);
    }
}

impl ScanLane for u32 {
    const LANE: LaneType = LaneType::U32;
}

impl ScanLane for i32 {
    const LANE: LaneType = LaneType::I32;
}

impl ScanLane for u64 {
    const LANE: LaneType = LaneType::U64;
}

impl ScanLane for i64 {
    const LANE: LaneType = LaneType::I64;
}

impl ScanLane for f32 {
    const LANE: LaneType = LaneType::F32;
}

impl ScanLane for f64 {
    const LANE: LaneType = LaneType::F64;
}

/// Scan entry point with a resolved kernel policy.
///
/// Construction is cheap; the CPU probe is cached globally. A `Scanner` is
/// immutable and may be shared freely across threads - the kernels mutate
/// only the target bit vector passed to each call.
#[derive(Debug, Clone, Copy)]
pub struct Scanner {
    use_simd: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Scanner with the default configuration (probe the CPU).
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Scanner with an explicit configuration.
    pub fn with_config(config: &EngineConfig) -> Self {
        let use_simd = match config.simd {
            SimdMode::Auto => supports_simd(),
            SimdMode::ForceScalar => false,
        };
        Self { use_simd }
    }

    /// Whether this scanner routes 1- and 2-byte lanes to the vector kernels.
    pub fn uses_simd(&self) -> bool {
        self.use_simd
    }

    /// Evaluate `column[index..index + length] c_op rhs` and merge the result
    /// bits into `vector` starting at `vector_index` under `b_op`.
    ///
    /// `vector_index` must be a multiple of 64 and the range
    /// `vector_index..vector_index + length` must fit in the vector's
    /// capacity. Row `index + i` maps to vector bit `vector_index + i`.
    /// On error the target is untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn scan<T: ScanLane>(
        &self,
        column: &[T],
        index: usize,
        length: usize,
        c_op: CompareOp,
        rhs: T,
        b_op: BooleanOp,
        vector: &mut BitVector,
        vector_index: usize,
    ) -> Result<()> {
        check_row_range(column.len(), index, length)?;
        check_vector_range(vector, vector_index, length)?;
        if length == 0 {
            return Ok(());
        }

        let words = target_words(vector, vector_index, length);
        T::scan_value(
            &column[index..index + length],
            c_op,
            rhs,
            b_op,
            words,
            self.use_simd,
        );
        Ok(())
    }

    /// Scan a whole column into the front of `vector`.
    pub fn scan_all<T: ScanLane>(
        &self,
        column: &[T],
        c_op: CompareOp,
        rhs: T,
        b_op: BooleanOp,
        vector: &mut BitVector,
    ) -> Result<()> {
        self.scan(column, 0, column.len(), c_op, rhs, b_op, vector, 0)
    }

    /// Evaluate `left[left_index + i] c_op right[right_index + i]` for `i` in
    /// `0..length` and merge into `vector` at `vector_index` under `b_op`.
    #[allow(clippy::too_many_arguments)]
    pub fn scan_pair<T: ScanLane>(
        &self,
        left: &[T],
        left_index: usize,
        c_op: CompareOp,
        right: &[T],
        right_index: usize,
        length: usize,
        b_op: BooleanOp,
        vector: &mut BitVector,
        vector_index: usize,
    ) -> Result<()> {
        check_row_range(left.len(), left_index, length)?;
        check_row_range(right.len(), right_index, length)?;
        check_vector_range(vector, vector_index, length)?;
        if length == 0 {
            return Ok(());
        }

        let words = target_words(vector, vector_index, length);
        T::scan_pair(
            &left[left_index..left_index + length],
            &right[right_index..right_index + length],
            c_op,
            b_op,
            words,
        );
        Ok(())
    }
}

pub(crate) fn check_row_range(column_length: usize, index: usize, length: usize) -> Result<()> {
    let end = index.checked_add(length).ok_or(Error::RowRangeOutOfBounds {
        index,
        end: usize::MAX,
        length: column_length,
    })?;
    if end > column_length {
        return Err(Error::RowRangeOutOfBounds {
            index,
            end,
            length: column_length,
        });
    }
    Ok(())
}

fn check_vector_range(vector: &BitVector, vector_index: usize, length: usize) -> Result<()> {
    if vector_index & 63 != 0 {
        return Err(Error::UnalignedVectorIndex(vector_index));
    }
    let end = vector_index + length;
    if end > vector.capacity() {
        return Err(Error::VectorTooSmall {
            capacity: vector.capacity(),
            index: vector_index,
            end,
        });
    }
    Ok(())
}

fn target_words(vector: &mut BitVector, vector_index: usize, length: usize) -> &mut [u64] {
    let first = vector_index >> 6;
    let count = (length + 63) >> 6;
    &mut vector.as_mut_words()[first..first + count]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_at_offset_vector_index() {
        let column: Vec<u32> = (0..64).collect();
        let mut vector = BitVector::new(192);

        let scanner = Scanner::new();
        scanner
            .scan(&column, 0, 64, CompareOp::LessThan, 2, BooleanOp::Set, &mut vector, 128)
            .unwrap();

        assert_eq!(vector.as_words()[0], 0);
        assert_eq!(vector.as_words()[1], 0);
        assert_eq!(vector.as_words()[2], 0b11);
    }

    #[test]
    fn test_unaligned_vector_index_leaves_target_untouched() {
        let column: Vec<i8> = vec![1, 2, 3];
        let mut vector = BitVector::new(64);
        vector.set(9, true);
        let before = vector.clone();

        let err = Scanner::new()
            .scan(&column, 0, 3, CompareOp::Equal, 2, BooleanOp::Set, &mut vector, 1)
            .unwrap_err();
        assert_eq!(err, Error::UnalignedVectorIndex(1));
        assert_eq!(vector, before);
    }

    #[test]
    fn test_row_range_out_of_bounds() {
        let column: Vec<u16> = vec![0; 10];
        let mut vector = BitVector::new(64);
        let err = Scanner::new()
            .scan(&column, 4, 7, CompareOp::Equal, 0, BooleanOp::Set, &mut vector, 0)
            .unwrap_err();
        assert_eq!(
            err,
            Error::RowRangeOutOfBounds {
                index: 4,
                end: 11,
                length: 10
            }
        );
    }

    #[test]
    fn test_vector_too_small() {
        let column: Vec<u16> = vec![0; 100];
        let mut vector = BitVector::new(64);
        let err = Scanner::new()
            .scan(&column, 0, 100, CompareOp::Equal, 0, BooleanOp::Set, &mut vector, 0)
            .unwrap_err();
        assert_eq!(
            err,
            Error::VectorTooSmall {
                capacity: 64,
                index: 0,
                end: 100
            }
        );
    }

    #[test]
    fn test_zero_length_scan_is_a_no_op() {
        let column: Vec<f64> = Vec::new();
        let mut vector = BitVector::new(64);
        vector.set(5, true);
        Scanner::new()
            .scan(&column, 0, 0, CompareOp::Equal, 0.0, BooleanOp::Set, &mut vector, 0)
            .unwrap();
        assert!(vector.get(5));
    }

    #[test]
    fn test_scan_pair_mismatched_ranges() {
        let left: Vec<u32> = vec![1, 2, 3, 4];
        let right: Vec<u32> = vec![1, 2];
        let mut vector = BitVector::new(64);
        assert!(Scanner::new()
            .scan_pair(
                &left,
                0,
                CompareOp::Equal,
                &right,
                0,
                4,
                BooleanOp::Set,
                &mut vector,
                0
            )
            .is_err());
    }

    #[test]
    fn test_force_scalar_matches_auto() {
        let column: Vec<u8> = (0..200).map(|i| (i * 7 % 256) as u8).collect();

        let auto = Scanner::new();
        let scalar_only = Scanner::with_config(&EngineConfig::force_scalar());
        assert!(!scalar_only.uses_simd());

        for c_op in CompareOp::ALL {
            let mut a = BitVector::new(256);
            let mut b = BitVector::new(256);
            auto.scan_all(&column, c_op, 100, BooleanOp::Set, &mut a).unwrap();
            scalar_only
                .scan_all(&column, c_op, 100, BooleanOp::Set, &mut b)
                .unwrap();
            assert_eq!(a, b, "{c_op:?}");
        }
    }
}
