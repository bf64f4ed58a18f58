//! High-level facade for the `bilevel-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core, threshold-selection and binarization crates,
//! - [`pipeline`]: the end-to-end matrix -> threshold -> bilevel image run,
//! - (feature `image`) [`decode`]: an adapter from `image::DynamicImage` to a
//!   validated 16-bit RGB raster, plus a [`decode::RasterInfo`] summary.
//!
//! ## Quickstart
//!
//! ```no_run
//! use bilevel::decode::{self, Rgb16Raster};
//! use bilevel::pipeline::PipelineConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = decode::open_dynamic("scan.tif")?;
//! let raster = Rgb16Raster::from_dynamic(img)?;
//! let out = raster.run(&PipelineConfig::default())?;
//! println!("threshold: {}", out.threshold);
//! println!("foreground: {:.1}%", out.image.foreground_fraction() * 100.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `bilevel::core`: pixels, pixel matrix, sample layout, grayscale rule, errors.
//! - `bilevel::otsu`: gray histogram and Otsu threshold selection.
//! - `bilevel::binarize`: bilevel images and thresholding.

pub use bilevel_binarize as binarize;
pub use bilevel_core as core;
pub use bilevel_otsu as otsu;

pub use bilevel_binarize::BinaryImage;
pub use bilevel_core::{BilevelError, Pixel16, PixelMatrix, PixelSource, SampleLayout};
pub use bilevel_otsu::{OtsuParams, SearchRange};

mod error;
pub mod pipeline;

#[cfg(feature = "image")]
pub mod decode;

pub use error::PipelineError;
