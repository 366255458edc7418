//! Engine configuration.

use serde::{Deserialize, Serialize};

/// How the dispatcher selects kernel implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimdMode {
    /// Probe the CPU once and use the vector kernels when the required
    /// feature set is present.
    #[default]
    Auto,
    /// Always run the scalar reference kernels. Useful for differential
    /// testing and for pinning down kernel-level issues in the field.
    ForceScalar,
}

/// Scan engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Kernel selection policy.
    pub simd: SimdMode,
}

impl EngineConfig {
    /// Configuration pinned to the scalar reference kernels.
    pub fn force_scalar() -> Self {
        Self {
            simd: SimdMode::ForceScalar,
        }
    }
}
