//! Global threshold selection with Otsu's between-class-variance criterion.
//!
//! Pixels are reduced to a 16-bit gray level with [`bilevel_core::gray16`],
//! accumulated into a [`GrayHistogram`], and the level maximising
//! `wB * wF * (mB - mF)^2` is returned.
//!
//! By default every level of the 16-bit domain is a candidate
//! ([`SearchRange::FullDomain`]). [`SearchRange::Legacy8Bit`] restricts the
//! search to levels `0..=255` for comparison with 8-bit-oriented tools; on
//! 16-bit data it usually finds no candidate and yields `0`.

mod histogram;
mod otsu;

pub use histogram::{check_capacity, GrayHistogram, HISTOGRAM_CAPACITY};
pub use otsu::{
    between_class_variance, otsu_from_histogram, select_threshold, select_threshold_from_source,
    select_threshold_with, OtsuParams, OtsuResult, SearchRange,
};
