//! Vectorized scan kernels and CPU feature dispatch.
//!
//! # SIMD strategy
//!
//! The hot loops process 64 logical rows per iteration:
//!
//! - **1-byte lanes**: two unaligned 256-bit loads, `cmpgt/cmpeq epi8`,
//!   `movemask_epi8`, merge two 32-bit masks into one 64-bit result word.
//! - **2-byte lanes**: four unaligned 256-bit loads, `cmpgt/cmpeq epi16`,
//!   `movemask_epi8` (two duplicate bits per lane), PEXT with mask
//!   `0xAAAAAAAA` to keep one bit per lane, merge four 16-bit groups.
//! - Wider lanes and floats run the scalar reference kernel.
//!
//! Hardware compares exist for signed lanes only, so unsigned lanes are
//! shifted onto the signed domain by subtracting the sign bias from both the
//! block and the splatted comparand. The hardware also provides only
//! greater-than and equals; the remaining operators come from operand
//! swapping and complementing the result word:
//!
//! ```text
//! gt, le  ->  cmpgt(block, rhs)    (complement for le)
//! lt, ge  ->  cmpgt(rhs, block)    (complement for ge)
//! eq, ne  ->  cmpeq(block, rhs)    (complement for ne)
//! ```
//!
//! # Safety
//!
//! The intrinsic kernels are `unsafe` because they require AVX2. The
//! dispatch layer probes the CPU once and routes to the scalar kernels when
//! the feature set is missing, so the intrinsics only run on hardware that
//! supports them.

pub mod dispatch;

#[cfg(target_arch = "x86_64")]
pub(crate) mod pext;
#[cfg(target_arch = "x86_64")]
pub(crate) mod scan8;
#[cfg(target_arch = "x86_64")]
pub(crate) mod scan16;

/// Compare-instruction selector for the const-generic kernels: emit
/// `cmpgt(block, rhs)`.
#[cfg(target_arch = "x86_64")]
pub(crate) const CMP_GT: u8 = 0;
/// Emit `cmpgt(rhs, block)` (operands swapped).
#[cfg(target_arch = "x86_64")]
pub(crate) const CMP_GT_SWAP: u8 = 1;
/// Emit `cmpeq(block, rhs)`.
#[cfg(target_arch = "x86_64")]
pub(crate) const CMP_EQ: u8 = 2;
