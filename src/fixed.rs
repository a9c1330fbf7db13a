//! Fixed-point scale factors for nearest-neighbor resampling.
//!
//! A [`ScaleQ10`] is a Q22.10 ratio of source extent to destination extent.
//! Both the ratio and its application truncate toward zero, so the chosen
//! source sample for a destination offset is reproducible bit-for-bit.

/// Fractional bits of a [`ScaleQ10`].
pub const SCALE_SHIFT: u32 = 10;
/// 1.0 in Q22.10.
pub const SCALE_ONE: u32 = 1 << SCALE_SHIFT;

/// Source-per-destination step in Q22.10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleQ10(u32);

impl ScaleQ10 {
    /// The identity scale.
    pub const ONE: Self = Self(SCALE_ONE);

    /// `(src << 10) / dst`, truncated. `None` when `dst` is zero or the
    /// ratio does not fit in 32 bits.
    #[inline]
    pub fn ratio(src: u32, dst: u32) -> Option<Self> {
        let q = ((src as u64) << SCALE_SHIFT).checked_div(dst as u64)?;
        u32::try_from(q).ok().map(Self)
    }

    /// Raw Q22.10 bits.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Source index for destination offset `offset`: `(scale * offset) >> 10`.
    #[inline]
    pub fn apply(self, offset: u32) -> u32 {
        ((self.0 as u64 * offset as u64) >> SCALE_SHIFT) as u32
    }
}

// ============================================================================
// Tests
// ============================================================================
