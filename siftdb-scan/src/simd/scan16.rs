// Copyright 2025 SiftDB Authors
//
// Licensed under the Apache License, Version 2.0

//! AVX2 scan kernel for 2-byte lanes.
//!
//! A 64-row block is four unaligned 256-bit loads of 16 lanes each.
//! `movemask_epi8` on a 16-bit compare mask produces two duplicate bits per
//! lane; PEXT with mask `0xAAAAAAAA` keeps the high bit of every pair, so
//! each 32-bit movemask compresses to 16 one-bit-per-lane bits and four
//! groups merge into the 64-bit result word. The unsigned shift bias is
//! -32768.
//!
//! Tail rows run through the scalar reference kernel in the lane's native
//! signedness.

use crate::ops::{self, CombineRule};
use crate::scalar;
use crate::simd::pext::pext_u32;
use crate::simd::{CMP_EQ, CMP_GT, CMP_GT_SWAP};
use crate::types::{BooleanOp, CompareOp};

/// PEXT mask selecting the high bit of every movemask bit pair.
const EVERY_OTHER_BIT: u32 = 0xAAAA_AAAA;

/// Scan an unsigned 16-bit column against `value`.
pub(crate) fn scan_unsigned(
    values: &[u16],
    c_op: CompareOp,
    value: u16,
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

/// Scan a signed 16-bit column against `value`.
pub(crate) fn scan_signed(
    values: &[i16],
    c_op: CompareOp,
    value: i16,
    b_op: BooleanOp,
    words: &mut [u64],
) {
    let split = values.len() & !63;
    if split > 0 {
        by_compare::<false>(
            bytemuck::cast_slice(&values[..split]),
            value as u16,
            c_op,
            b_op,
            &mut words[..split >> 6],
        );
    }
    if split < values.len() {
        scalar::scan_value(&values[split..], c_op, value, b_op, &mut words[split >> 6..]);
    }
}

fn by_compare<const UNSIGNED: bool>(
    values: &[u16],
    value: u16,
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
    values: &[u16],
    value: u16,
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
    values: &[u16],
    value: u16,
    words: &mut [u64],
) {
    use std::arch::x86_64::*;

    debug_assert_eq!(values.len() & 63, 0);
    debug_assert_eq!(words.len(), values.len() >> 6);

    let bias = _mm256_set1_epi16(-32768);
    let mut rhs = _mm256_set1_epi16(value as i16);
    if UNSIGNED {
        rhs = _mm256_sub_epi16(rhs, bias);
    }

    let ptr = values.as_ptr();
    for (w, word) in words.iter_mut().enumerate() {
        let row = w << 6;
        let mut block1 = _mm256_loadu_si256(ptr.add(row) as *const __m256i);
        let mut block2 = _mm256_loadu_si256(ptr.add(row + 16) as *const __m256i);
        let mut block3 = _mm256_loadu_si256(ptr.add(row + 32) as *const __m256i);
        let mut block4 = _mm256_loadu_si256(ptr.add(row + 48) as *const __m256i);
        if UNSIGNED {
            block1 = _mm256_sub_epi16(block1, bias);
            block2 = _mm256_sub_epi16(block2, bias);
            block3 = _mm256_sub_epi16(block3, bias);
            block4 = _mm256_sub_epi16(block4, bias);
        }

        let (mask1, mask2, mask3, mask4) = match MODE {
            CMP_GT => (
                _mm256_cmpgt_epi16(block1, rhs),
                _mm256_cmpgt_epi16(block2, rhs),
                _mm256_cmpgt_epi16(block3, rhs),
                _mm256_cmpgt_epi16(block4, rhs),
            ),
            CMP_GT_SWAP => (
                _mm256_cmpgt_epi16(rhs, block1),
                _mm256_cmpgt_epi16(rhs, block2),
                _mm256_cmpgt_epi16(rhs, block3),
                _mm256_cmpgt_epi16(rhs, block4),
            ),
            _ => (
                _mm256_cmpeq_epi16(block1, rhs),
                _mm256_cmpeq_epi16(block2, rhs),
                _mm256_cmpeq_epi16(block3, rhs),
                _mm256_cmpeq_epi16(block4, rhs),
            ),
        };

        // One bit per byte from movemask, one bit per lane after PEXT
        let group1 = pext_u32(_mm256_movemask_epi8(mask1) as u32, EVERY_OTHER_BIT) as u64;
        let group2 = pext_u32(_mm256_movemask_epi8(mask2) as u32, EVERY_OTHER_BIT) as u64;
        let group3 = pext_u32(_mm256_movemask_epi8(mask3) as u32, EVERY_OTHER_BIT) as u64;
        let group4 = pext_u32(_mm256_movemask_epi8(mask4) as u32, EVERY_OTHER_BIT) as u64;

        let mut result = group4 << 48 | group3 << 32 | group2 << 16 | group1;
        if INVERT {
            result = !result;
        }

        B::apply(word, result);
    }
}
