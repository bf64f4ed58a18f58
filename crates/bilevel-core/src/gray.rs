//! Grayscale reduction shared by threshold selection and binarization.

/// Number of distinct levels produced by [`gray16`].
pub const GRAY_LEVELS: usize = 1 << 16;

/// Largest level produced by [`gray16`].
pub const MAX_GRAY: u16 = u16::MAX;

/// Unweighted channel average, truncated: `(r + g + b) / 3`.
///
/// This is not a luminance-correct conversion. It is the single reduction
/// rule applied on both sides of the threshold comparison, always at 16-bit
/// depth, so a selected threshold is meaningful against binarized values.
#[inline]
pub fn gray16(r: u16, g: u16, b: u16) -> u16 {
    ((r as u32 + g as u32 + b as u32) / 3) as u16
}
