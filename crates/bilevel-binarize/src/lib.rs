//! Threshold a 16-bit RGB raster into a [`BinaryImage`].
//!
//! Each pixel is reduced with the same [`bilevel_core::gray16`] rule and at
//! the same bit depth used for threshold selection, then compared with the
//! threshold: `gray > threshold` is foreground.

mod binarize;
mod binary_image;

pub use binarize::{binarize, binarize_samples};
pub use binary_image::BinaryImage;
