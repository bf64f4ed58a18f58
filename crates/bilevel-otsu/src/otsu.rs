use bilevel_core::{PixelSource, Result, SampleLayout, GRAY_LEVELS};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::GrayHistogram;

/// Which gray levels are tried as candidate thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchRange {
    /// Every level of the 16-bit domain the histogram covers.
    #[default]
    FullDomain,
    /// Levels `0..=255` only, regardless of the histogram's domain.
    ///
    /// Kept for comparison with 8-bit-oriented tools. On 16-bit data whose
    /// mass lies above 255 no candidate qualifies and the result is `0`.
    Legacy8Bit,
}

impl SearchRange {
    /// Exclusive upper bound of the candidate levels.
    pub fn end(&self) -> usize {
        match self {
            SearchRange::FullDomain => GRAY_LEVELS,
            SearchRange::Legacy8Bit => 256,
        }
    }
}

/// Threshold selection settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtsuParams {
    pub search: SearchRange,
}

/// Outcome of a threshold search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OtsuResult {
    /// Selected level; pixels with a gray level above it are foreground.
    pub threshold: u16,
    /// Between-class variance at `threshold`; `0.0` when no split exists.
    pub between_class_variance: f64,
}

/// `wB * wF * (mB - mF)^2`.
#[inline]
pub fn between_class_variance(
    weight_background: f64,
    weight_foreground: f64,
    mean_background: f64,
    mean_foreground: f64,
) -> f64 {
    let d = mean_background - mean_foreground;
    weight_background * weight_foreground * d * d
}

/// Run the Otsu search over an already built histogram.
///
/// Candidates with an empty background class are skipped and the scan stops
/// once the foreground class is empty. Only a strict improvement replaces the
/// current best, so ties keep the lowest level. If no candidate qualifies the
/// threshold is `0`.
pub fn otsu_from_histogram(hist: &GrayHistogram, params: &OtsuParams) -> OtsuResult {
    let total = hist.total();
    let sum_total = hist.total_intensity();
    let end = params.search.end().min(hist.buckets().len());

    let mut sum_b = 0f64;
    let mut w_b = 0u64;
    let mut best = OtsuResult::default();

    for (t, &h) in hist.buckets()[..end].iter().enumerate() {
        w_b += h as u64;
        if w_b == 0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0 {
            break;
        }

        sum_b += t as f64 * h as f64;
        let m_b = sum_b / w_b as f64;
        let m_f = (sum_total - sum_b) / w_f as f64;

        let var_between = between_class_variance(w_b as f64, w_f as f64, m_b, m_f);
        if var_between > best.between_class_variance {
            best = OtsuResult {
                threshold: t as u16,
                between_class_variance: var_between,
            };
        }
    }

    best
}

/// Select a threshold for an interleaved RGB16 sample buffer with default
/// parameters.
pub fn select_threshold(samples: &[u16], layout: SampleLayout) -> Result<u16> {
    select_threshold_with(samples, layout, &OtsuParams::default()).map(|r| r.threshold)
}

#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(samples, params), fields(samples = samples.len()))
)]
pub fn select_threshold_with(
    samples: &[u16],
    layout: SampleLayout,
    params: &OtsuParams,
) -> Result<OtsuResult> {
    let hist = GrayHistogram::from_samples(samples, layout)?;
    Ok(search_logged(&hist, params))
}

#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(src, params),
        fields(width = src.width(), height = src.height())
    )
)]
pub fn select_threshold_from_source<S: PixelSource + ?Sized>(
    src: &S,
    params: &OtsuParams,
) -> Result<OtsuResult> {
    let hist = GrayHistogram::from_source(src)?;
    Ok(search_logged(&hist, params))
}

fn search_logged(hist: &GrayHistogram, params: &OtsuParams) -> OtsuResult {
    let res = otsu_from_histogram(hist, params);
    log::debug!(
        "otsu: pixels={} levels={} search={:?} threshold={} variance={:.3e}",
        hist.total(),
        hist.non_empty_levels(),
        params.search,
        res.threshold,
        res.between_class_variance
    );
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bilevel_core::BilevelError;

    fn gray_samples(levels: &[(u16, usize)]) -> Vec<u16> {
        levels
            .iter()
            .flat_map(|&(l, n)| std::iter::repeat([l, l, l]).take(n).flatten())
            .collect()
    }

    #[test]
    fn bimodal_50_200_picks_lower_cluster() {
        // With all mass on 50 and 200, every t in 50..200 gives the same
        // variance (N/2)^2 * 150^2; the first one wins.
        let samples = gray_samples(&[(50, 50), (200, 50)]);
        let res = select_threshold_with(&samples, SampleLayout::RGB16, &OtsuParams::default())
            .expect("select");
        assert_eq!(res.threshold, 50);
        assert_relative_eq!(res.between_class_variance, 50.0 * 50.0 * 150.0 * 150.0);
    }

    #[test]
    fn uneven_three_level_split() {
        // t=10: wB=2 wF=2 mB=10 mF=25 -> 900
        // t=20: wB=3 wF=1 mB=40/3 mF=30 -> 833.3
        let samples = gray_samples(&[(10, 2), (20, 1), (30, 1)]);
        let res = select_threshold_with(&samples, SampleLayout::RGB16, &OtsuParams::default())
            .expect("select");
        assert_eq!(res.threshold, 10);
        assert_relative_eq!(res.between_class_variance, 900.0, epsilon = 1e-9);
    }

    #[test]
    fn uniform_image_yields_zero() {
        for level in [0u16, 1, 128, 40_000, u16::MAX] {
            let samples = gray_samples(&[(level, 37)]);
            let res = select_threshold_with(&samples, SampleLayout::RGB16, &OtsuParams::default())
                .expect("select");
            assert_eq!(res.threshold, 0, "level {level}");
            assert_eq!(res.between_class_variance, 0.0);
        }
    }

    #[test]
    fn empty_buffer_yields_zero() {
        assert_eq!(select_threshold(&[], SampleLayout::RGB16), Ok(0));
    }

    #[test]
    fn full_domain_finds_split_above_255() {
        let samples = gray_samples(&[(1_000, 10), (30_000, 10)]);
        assert_eq!(select_threshold(&samples, SampleLayout::RGB16), Ok(1_000));
    }

    #[test]
    fn legacy_8bit_search_misses_16bit_clusters() {
        let samples = gray_samples(&[(1_000, 10), (30_000, 10)]);
        let params = OtsuParams {
            search: SearchRange::Legacy8Bit,
        };
        let res = select_threshold_with(&samples, SampleLayout::RGB16, &params).expect("select");
        assert_eq!(res.threshold, 0);
        assert_eq!(res.between_class_variance, 0.0);
    }

    #[test]
    fn legacy_8bit_agrees_when_data_is_8bit() {
        let samples = gray_samples(&[(50, 7), (90, 3), (200, 11)]);
        let full = select_threshold(&samples, SampleLayout::RGB16).expect("select");
        let legacy = select_threshold_with(
            &samples,
            SampleLayout::RGB16,
            &OtsuParams {
                search: SearchRange::Legacy8Bit,
            },
        )
        .expect("select");
        assert_eq!(full, legacy.threshold);
    }

    #[test]
    fn deterministic_for_identical_input() {
        let samples: Vec<u16> = (0..3000u32).map(|i| ((i * 7919) % 65536) as u16).collect();
        let a = select_threshold(&samples, SampleLayout::RGB16).expect("select");
        let b = select_threshold(&samples, SampleLayout::RGB16).expect("select");
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_buffers() {
        assert!(matches!(
            select_threshold(&[1, 2], SampleLayout::RGB16),
            Err(BilevelError::InvalidGeometry { .. })
        ));
        let rgba = SampleLayout {
            channels: 4,
            bit_depth: 16,
        };
        assert!(matches!(
            select_threshold(&[0; 8], rgba),
            Err(BilevelError::UnsupportedFormat { channels: 4, .. })
        ));
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let p: OtsuParams = serde_json::from_str("{}").expect("parse");
        assert_eq!(p.search, SearchRange::FullDomain);
        let p: OtsuParams = serde_json::from_str(r#"{"search":"legacy8_bit"}"#).expect("parse");
        assert_eq!(p.search, SearchRange::Legacy8Bit);
    }
}
