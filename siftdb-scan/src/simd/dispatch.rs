//! Runtime CPU feature detection for kernel dispatch.
//!
//! The probe runs once and is cached; integrators typically call
//! [`supports_simd`] at startup to report which path the engine will take.
//! A missing feature set is not an error - the dispatcher transparently runs
//! the scalar reference kernels instead.

use std::sync::OnceLock;

/// CPU feature flags the scan kernels care about.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuFeatures {
    /// 256-bit integer SIMD with signed byte/word compares (x86).
    pub has_avx2: bool,
    /// Parallel bit extract (x86). Only accelerates the 16-bit lane pack;
    /// a portable extraction covers its absence.
    pub has_bmi2: bool,
    /// Hardware population count (x86).
    pub has_popcnt: bool,
}

impl CpuFeatures {
    /// Detect CPU features at runtime.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self {
                has_avx2: is_x86_feature_detected!("avx2"),
                has_bmi2: is_x86_feature_detected!("bmi2"),
                has_popcnt: is_x86_feature_detected!("popcnt"),
            }
        }

        #[cfg(not(target_arch = "x86_64"))]
        {
            Self::default()
        }
    }

    /// Whether the vectorized scan kernels can run.
    pub fn supports_scan_kernels(&self) -> bool {
        self.has_avx2 && self.has_popcnt
    }
}

/// Global CPU features, detected once at first use.
static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Get detected CPU features (cached).
#[inline]
pub fn cpu_features() -> &'static CpuFeatures {
    CPU_FEATURES.get_or_init(|| {
        let features = CpuFeatures::detect();
        tracing::debug!(
            avx2 = features.has_avx2,
            bmi2 = features.has_bmi2,
            popcnt = features.has_popcnt,
            "probed scan kernel CPU features"
        );
        features
    })
}

/// Whether the vectorized scan kernels are available on this CPU.
#[inline]
pub fn supports_simd() -> bool {
    cpu_features().supports_scan_kernels()
}
