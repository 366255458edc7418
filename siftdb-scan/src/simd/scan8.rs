// Copyright 2025 SiftDB Authors
//
// Licensed under the Apache License, Version 2.0

//! AVX2 scan kernel for 1-byte lanes.
//!
//! A 64-row block is two unaligned 256-bit loads. Each `cmpgt/cmpeq epi8`
//! yields an all-ones or all-zeros byte per lane; `movemask_epi8` packs one
//! bit per byte, and two 32-bit halves merge into the 64-bit result word.
//! Unsigned lanes are shifted onto the signed domain by subtracting -128
//! from the block and the splatted comparand before comparing; equality is
//! unaffected by the shift and takes it anyway.
//!
//! Tail rows (`length % 64`) run through the scalar reference kernel in the
//! lane's native signedness.

use crate::ops::{self, CombineRule};
use crate::scalar;
use crate::simd::{CMP_EQ, CMP_GT, CMP_GT_SWAP};
use crate::types::{BooleanOp, CompareOp};

/// Scan an unsigned byte column against `value`.
pub(crate) fn scan_unsigned(
    values: &[u8],
    c_op: CompareOp,
    value: u8,
    b_op: BooleanOp,
    words: &mut [u64],
) {
    let split = values.len() & !63;
    if split > 0 {
        by_compare::<true>(&values[..split], value, c_op, b_op, &mut words[..split >> 6]);
    }
    if split < values.len() {
        scalar::scan_value(&values[split..], c_op, value, b_op, &mut words[split >> 6..]);
    }
}

/// Scan a signed byte column against `value`.
pub(crate) fn scan_signed(
    values: &[i8],
    c_op: CompareOp,
    value: i8,
    b_op: BooleanOp,
    words: &mut [u64],
) {
    let split = values.len() & !63;
    if split > 0 {
        by_compare::<false>(
            bytemuck::cast_slice(&values[..split]),
            value as u8,
            c_op,
            b_op,
            &mut words[..split >> 6],
        );
    }
    if split < values.len() {
        scalar::scan_value(&values[split..], c_op, value, b_op, &mut words[split >> 6..]);
    }
}

/// Map the comparison operator onto the signed-only hardware compares:
/// operand swap for lt/ge, complement for le/ge/ne.
fn by_compare<const UNSIGNED: bool>(
    values: &[u8],
    value: u8,
    c_op: CompareOp,
    b_op: BooleanOp,
    words: &mut [u64],
) {
    match c_op {
        CompareOp::GreaterThan => by_combine::<CMP_GT, false, UNSIGNED>(values, value, b_op, words),
        CompareOp::LessThanOrEqual => {
            by_combine::<CMP_GT, true, UNSIGNED>(values, value, b_op, words)
        }
        CompareOp::LessThan => {
            by_combine::<CMP_GT_SWAP, false, UNSIGNED>(values, value, b_op, words)
        }
        CompareOp::GreaterThanOrEqual => {
            by_combine::<CMP_GT_SWAP, true, UNSIGNED>(values, value, b_op, words)
        }
        CompareOp::Equal => by_combine::<CMP_EQ, false, UNSIGNED>(values, value, b_op, words),
        CompareOp::NotEqual => by_combine::<CMP_EQ, true, UNSIGNED>(values, value, b_op, words),
    }
}

fn by_combine<const MODE: u8, const INVERT: bool, const UNSIGNED: bool>(
    values: &[u8],
    value: u8,
    b_op: BooleanOp,
    words: &mut [u64],
) {
    // Safety: the dispatcher only routes to this module after the AVX2
    // probe succeeded.
    unsafe {
        match b_op {
            BooleanOp::Set => blocks::<MODE, INVERT, UNSIGNED, ops::Set>(values, value, words),
            BooleanOp::And => blocks::<MODE, INVERT, UNSIGNED, ops::And>(values, value, words),
            BooleanOp::Or => blocks::<MODE, INVERT, UNSIGNED, ops::Or>(values, value, words),
            BooleanOp::AndNot => {
                blocks::<MODE, INVERT, UNSIGNED, ops::AndNot>(values, value, words)
            }
        }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn blocks<const MODE: u8, const INVERT: bool, const UNSIGNED: bool, B: CombineRule>(
    values: &[u8],
    value: u8,
    words: &mut [u64],
) {
    use std::arch::x86_64::*;

    debug_assert_eq!(values.len() & 63, 0);
    debug_assert_eq!(words.len(), values.len() >> 6);

    // Shift the unsigned domain onto the signed one: subtracting -128 maps
    // 0 to the smallest signed byte
    let bias = _mm256_set1_epi8(-128);
    let mut rhs = _mm256_set1_epi8(value as i8);
    if UNSIGNED {
        rhs = _mm256_sub_epi8(rhs, bias);
    }

    let ptr = values.as_ptr();
    for (w, word) in words.iter_mut().enumerate() {
        let row = w << 6;
        let mut block1 = _mm256_loadu_si256(ptr.add(row) as *const __m256i);
        let mut block2 = _mm256_loadu_si256(ptr.add(row + 32) as *const __m256i);
        if UNSIGNED {
            block1 = _mm256_sub_epi8(block1, bias);
            block2 = _mm256_sub_epi8(block2, bias);
        }

        let (mask1, mask2) = match MODE {
            CMP_GT => (
                _mm256_cmpgt_epi8(block1, rhs),
                _mm256_cmpgt_epi8(block2, rhs),
            ),
            CMP_GT_SWAP => (
                _mm256_cmpgt_epi8(rhs, block1),
                _mm256_cmpgt_epi8(rhs, block2),
            ),
            _ => (
                _mm256_cmpeq_epi8(block1, rhs),
                _mm256_cmpeq_epi8(block2, rhs),
            ),
        };

        let low = _mm256_movemask_epi8(mask1) as u32;
        let high = _mm256_movemask_epi8(mask2) as u32;
        let mut result = (high as u64) << 32 | low as u64;
        if INVERT {
            result = !result;
        }

        B::apply(word, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::dispatch::supports_simd;

    fn check_against_scalar_u8(values: &[u8], c_op: CompareOp, value: u8, b_op: BooleanOp) {
        if !supports_simd() {
            return;
        }
        let word_len = (values.len() + 63) >> 6;
        let mut expected = vec![0x5555_5555_5555_5555u64; word_len];
        let mut actual = expected.clone();

        scalar::scan_value(values, c_op, value, b_op, &mut expected);
        scan_unsigned(values, c_op, value, b_op, &mut actual);
        assert_eq!(expected, actual, "{c_op:?} {b_op:?} len {}", values.len());
    }

    #[test]
    fn test_matches_scalar_at_boundary_lengths() {
        for length in [1, 31, 32, 33, 63, 64, 65, 127, 128, 129, 255, 256, 257] {
            let values: Vec<u8> = (0..length).map(|i| (i % 251) as u8).collect();
            for c_op in CompareOp::ALL {
                for b_op in BooleanOp::ALL {
                    check_against_scalar_u8(&values, c_op, 125, b_op);
                }
            }
        }
    }

    #[test]
    fn test_signed_matches_scalar() {
        if !supports_simd() {
            return;
        }
        let values: Vec<i8> = (0..200).map(|i| (i as i8).wrapping_mul(3)).collect();
        for c_op in CompareOp::ALL {
            let mut expected = vec![0u64; 4];
            let mut actual = vec![0u64; 4];
            scalar::scan_value(&values, c_op, -5, BooleanOp::Set, &mut expected);
            scan_signed(&values, c_op, -5, BooleanOp::Set, &mut actual);
            assert_eq!(expected, actual, "{c_op:?}");
        }
    }

    #[test]
    fn test_unsigned_extremes() {
        if !supports_simd() {
            return;
        }
        let values: Vec<u8> = vec![0, 1, 127, 128, 129, 254, 255, 200];
        let mut words = vec![0u64; 1];
        scan_unsigned(&values, CompareOp::GreaterThan, 127, BooleanOp::Set, &mut words);
        assert_eq!(words[0], 0b1111_1000);
    }
}
