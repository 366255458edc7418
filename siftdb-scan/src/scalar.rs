//! Scalar reference kernels.
//!
//! These define the authoritative semantics: for each 64-row chunk, evaluate
//! the predicate in the column's native type, accumulate matches into a local
//! word, and merge that word into the target under the boolean combinator -
//! exactly one combine per word, partial tail words included. The vectorized
//! paths must produce bit-for-bit identical results.

use crate::ops::{self, CombineRule, CompareRule};
use crate::types::{BooleanOp, CompareOp};

/// Compare `values` against a single scalar and merge into `words`.
///
/// `words` must hold at least `ceil(values.len() / 64)` entries; row `i`
/// of the slice maps to bit `i % 64` of word `i / 64`.
pub(crate) fn scan_value<T: PartialOrd + Copy>(
    values: &[T],
    c_op: CompareOp,
    value: T,
    b_op: BooleanOp,
    words: &mut [u64],
) {
    match c_op {
        CompareOp::Equal => value_combine::<T, ops::Equal>(values, value, b_op, words),
        CompareOp::NotEqual => value_combine::<T, ops::NotEqual>(values, value, b_op, words),
        CompareOp::LessThan => value_combine::<T, ops::LessThan>(values, value, b_op, words),
        CompareOp::LessThanOrEqual => {
            value_combine::<T, ops::LessThanOrEqual>(values, value, b_op, words)
        }
        CompareOp::GreaterThan => value_combine::<T, ops::GreaterThan>(values, value, b_op, words),
        CompareOp::GreaterThanOrEqual => {
            value_combine::<T, ops::GreaterThanOrEqual>(values, value, b_op, words)
        }
    }
}

/// Compare `left` against `right` row-by-row and merge into `words`.
pub(crate) fn scan_pair<T: PartialOrd + Copy>(
    left: &[T],
    right: &[T],
    c_op: CompareOp,
    b_op: BooleanOp,
    words: &mut [u64],
) {
    debug_assert_eq!(left.len(), right.len());
    match c_op {
        CompareOp::Equal => pair_combine::<T, ops::Equal>(left, right, b_op, words),
        CompareOp::NotEqual => pair_combine::<T, ops::NotEqual>(left, right, b_op, words),
        CompareOp::LessThan => pair_combine::<T, ops::LessThan>(left, right, b_op, words),
        CompareOp::LessThanOrEqual => {
            pair_combine::<T, ops::LessThanOrEqual>(left, right, b_op, words)
        }
        CompareOp::GreaterThan => pair_combine::<T, ops::GreaterThan>(left, right, b_op, words),
        CompareOp::GreaterThanOrEqual => {
            pair_combine::<T, ops::GreaterThanOrEqual>(left, right, b_op, words)
        }
    }
}

fn value_combine<T: Copy, C: CompareRule<T>>(
    values: &[T],
    value: T,
    b_op: BooleanOp,
    words: &mut [u64],
) {
    match b_op {
        BooleanOp::Set => value_blocks::<T, C, ops::Set>(values, value, words),
        BooleanOp::And => value_blocks::<T, C, ops::And>(values, value, words),
        BooleanOp::Or => value_blocks::<T, C, ops::Or>(values, value, words),
        BooleanOp::AndNot => value_blocks::<T, C, ops::AndNot>(values, value, words),
    }
}

fn pair_combine<T: Copy, C: CompareRule<T>>(
    left: &[T],
    right: &[T],
    b_op: BooleanOp,
    words: &mut [u64],
) {
    match b_op {
        BooleanOp::Set => pair_blocks::<T, C, ops::Set>(left, right, words),
        BooleanOp::And => pair_blocks::<T, C, ops::And>(left, right, words),
        BooleanOp::Or => pair_blocks::<T, C, ops::Or>(left, right, words),
        BooleanOp::AndNot => pair_blocks::<T, C, ops::AndNot>(left, right, words),
    }
}

fn value_blocks<T: Copy, C: CompareRule<T>, B: CombineRule>(
    values: &[T],
    value: T,
    words: &mut [u64],
) {
    debug_assert!(words.len() >= (values.len() + 63) >> 6);
    for (chunk, word) in values.chunks(64).zip(words.iter_mut()) {
        let mut result = 0u64;
        for (bit, &row) in chunk.iter().enumerate() {
            if C::matches(row, value) {
                result |= 1u64 << bit;
            }
        }
        B::apply(word, result);
    }
}

fn pair_blocks<T: Copy, C: CompareRule<T>, B: CombineRule>(
    left: &[T],
    right: &[T],
    words: &mut [u64],
) {
    debug_assert!(words.len() >= (left.len() + 63) >> 6);
    for ((left_chunk, right_chunk), word) in
        left.chunks(64).zip(right.chunks(64)).zip(words.iter_mut())
    {
        let mut result = 0u64;
        for (bit, (&l, &r)) in left_chunk.iter().zip(right_chunk).enumerate() {
            if C::matches(l, r) {
                result |= 1u64 << bit;
            }
        }
        B::apply(word, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_value_set() {
        let column: Vec<i8> = (0..8).collect();
        let mut words = [0u64; 1];
        scan_value(&column, CompareOp::GreaterThan, 3, BooleanOp::Set, &mut words);
        assert_eq!(words[0], 0xF0);

        scan_value(
            &column,
            CompareOp::LessThanOrEqual,
            3,
            BooleanOp::Set,
            &mut words,
        );
        assert_eq!(words[0], 0x0F);
    }

    #[test]
    fn test_partial_word_combine() {
        // And over a 10-row tail clears stale bits above the range in that word
        let column: Vec<u16> = vec![5; 10];
        let mut words = [u64::MAX; 1];
        scan_value(&column, CompareOp::Equal, 5, BooleanOp::And, &mut words);
        assert_eq!(words[0], 0x3FF);
    }

    #[test]
    fn test_multi_word_or() {
        let column: Vec<u32> = (0..130).collect();
        let mut words = [0u64; 3];
        scan_value(&column, CompareOp::GreaterThanOrEqual, 128, BooleanOp::Or, &mut words);
        assert_eq!(words[0], 0);
        assert_eq!(words[1], 0);
        assert_eq!(words[2], 0b11);
    }

    #[test]
    fn test_scan_pair() {
        let left: Vec<u32> = vec![1, 2, 3, 4];
        let right: Vec<u32> = vec![1, 2, 0, 4];
        let mut words = [0u64; 1];
        scan_pair(&left, &right, CompareOp::Equal, BooleanOp::Set, &mut words);
        assert_eq!(words[0], 0b1011);
    }

    #[test]
    fn test_and_not() {
        let column: Vec<i64> = (0..6).collect();
        let mut words = [0b111111u64; 1];
        scan_value(&column, CompareOp::LessThan, 2, BooleanOp::AndNot, &mut words);
        assert_eq!(words[0], 0b111100);
    }

    #[test]
    fn test_empty_column_touches_nothing() {
        let column: Vec<i8> = Vec::new();
        let mut words = [0xDEAD_BEEFu64; 1];
        scan_value(&column, CompareOp::Equal, 0, BooleanOp::Set, &mut words);
        assert_eq!(words[0], 0xDEAD_BEEF);
    }
}
