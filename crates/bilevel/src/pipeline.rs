//! End-to-end run: pixel matrix, threshold selection, binarization.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::binarize::{binarize, BinaryImage};
use crate::core::{PixelMatrix, PixelSource, Result, SampleLayout};
use crate::otsu::{select_threshold_from_source, select_threshold_with, OtsuParams};

/// Pipeline settings, typically loaded from JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub otsu: OtsuParams,
}

/// Result of a full run.
#[derive(Clone, Debug)]
pub struct BilevelOutput {
    pub threshold: u16,
    pub between_class_variance: f64,
    pub image: BinaryImage,
}

/// Run the pipeline on an interleaved sample buffer.
///
/// The buffer is validated once while building the pixel matrix; threshold
/// selection and binarization then read the same samples through the same
/// grayscale rule.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(samples, cfg))
)]
pub fn run(
    samples: &[u16],
    width: usize,
    height: usize,
    layout: SampleLayout,
    cfg: &PipelineConfig,
) -> Result<BilevelOutput> {
    let matrix = PixelMatrix::build(samples, width, height, layout)?;
    log::info!(
        "pixel matrix: {} rows x {} cols",
        matrix.rows(),
        matrix.cols()
    );

    let otsu = select_threshold_with(samples, layout, &cfg.otsu)?;
    log::info!("binarization threshold: {}", otsu.threshold);

    let image = binarize(&matrix, otsu.threshold);
    Ok(BilevelOutput {
        threshold: otsu.threshold,
        between_class_variance: otsu.between_class_variance,
        image,
    })
}

/// Run threshold selection and binarization on any pixel source.
pub fn run_source<S: PixelSource + ?Sized>(src: &S, cfg: &PipelineConfig) -> Result<BilevelOutput> {
    let otsu = select_threshold_from_source(src, &cfg.otsu)?;
    log::info!("binarization threshold: {}", otsu.threshold);
    Ok(BilevelOutput {
        threshold: otsu.threshold,
        between_class_variance: otsu.between_class_variance,
        image: binarize(src, otsu.threshold),
    })
}
