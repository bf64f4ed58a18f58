//! Core types for global-threshold binarization of 16-bit RGB rasters.
//!
//! This crate is intentionally small. It owns the data model shared by the
//! threshold selector (`bilevel-otsu`) and the binarizer (`bilevel-binarize`):
//! - [`Pixel16`] and the [`PixelMatrix`] built from an interleaved sample buffer,
//! - [`SampleLayout`] / [`RgbSamples`] describing a borrowed sample buffer,
//! - the one grayscale reduction rule ([`gray16`]) both stages must agree on,
//! - the [`BilevelError`] taxonomy.
//!
//! It does *not* decode image files; that is left to the caller (see the
//! `bilevel` facade crate for an `image`-based adapter).

mod error;
mod gray;
mod layout;
mod logger;
mod matrix;
mod pixel;
mod source;

pub use error::{BilevelError, Result};
pub use gray::{gray16, GRAY_LEVELS, MAX_GRAY};
pub use layout::{mask_sample, RgbSamples, SampleLayout};
pub use matrix::PixelMatrix;
pub use pixel::Pixel16;
pub use source::PixelSource;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
