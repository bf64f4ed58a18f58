use bilevel_core::{PixelSource, Result, RgbSamples, SampleLayout};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::BinaryImage;

/// Classify every pixel of `src`: foreground iff its gray level is strictly
/// above `threshold`.
///
/// The output has exactly the geometry of `src` and each bit depends only on
/// the pixel at the same coordinate.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width(), height = src.height()))
)]
pub fn binarize<S: PixelSource + ?Sized>(src: &S, threshold: u16) -> BinaryImage {
    let (w, h) = (src.width(), src.height());
    let mut bits = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            bits.push(src.pixel(x, y).gray() > threshold);
        }
    }
    let out = BinaryImage::from_parts_unchecked(w, h, bits);
    log::debug!(
        "binarize: {}x{} threshold={} foreground={}",
        w,
        h,
        threshold,
        out.foreground_count()
    );
    out
}

/// Validate an interleaved sample buffer and binarize it.
pub fn binarize_samples(
    samples: &[u16],
    width: usize,
    height: usize,
    layout: SampleLayout,
    threshold: u16,
) -> Result<BinaryImage> {
    let view = RgbSamples::new(samples, width, height, layout)?;
    Ok(binarize(&view, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bilevel_core::{BilevelError, Pixel16, PixelMatrix, MAX_GRAY};

    fn matrix(width: usize, height: usize, levels: &[u16]) -> PixelMatrix {
        let px = levels.iter().map(|&l| Pixel16::splat(l)).collect();
        PixelMatrix::from_pixels(width, height, px).expect("matrix")
    }

    #[test]
    fn keeps_geometry() {
        let m = matrix(4, 3, &[7; 12]);
        let out = binarize(&m, 3);
        assert_eq!((out.width(), out.height()), (4, 3));
        assert_eq!(out.foreground_count(), 12);
    }

    #[test]
    fn strictly_greater_is_foreground() {
        let m = matrix(3, 1, &[99, 100, 101]);
        let out = binarize(&m, 100);
        assert_eq!(out.row(0), &[false, false, true]);
    }

    #[test]
    fn uses_full_channel_average() {
        // (300 + 300 + 0) / 3 = 200; a last-channel-only division would give 600.
        let m = PixelMatrix::from_pixels(1, 1, vec![Pixel16::new(300, 300, 0)]).expect("matrix");
        assert_eq!(binarize(&m, 200).get(0, 0), Some(false));
        assert_eq!(binarize(&m, 199).get(0, 0), Some(true));
    }

    #[test]
    fn zero_threshold_keeps_only_black_as_background() {
        let m = matrix(4, 1, &[0, 1, 500, MAX_GRAY]);
        assert_eq!(binarize(&m, 0).row(0), &[false, true, true, true]);
    }

    #[test]
    fn max_threshold_is_all_background() {
        let m = matrix(4, 1, &[0, 1, 500, MAX_GRAY]);
        assert_eq!(binarize(&m, MAX_GRAY).foreground_count(), 0);
    }

    #[test]
    fn binary_input_is_a_fixed_point() {
        let levels = [0, MAX_GRAY, MAX_GRAY, 0, 0, MAX_GRAY];
        let m = matrix(3, 2, &levels);
        let once = binarize(&m, 1);
        for t in [1u16, 2, 32_768, MAX_GRAY - 1] {
            let again = matrix(
                3,
                2,
                &once
                    .as_slice()
                    .iter()
                    .map(|&b| if b { MAX_GRAY } else { 0 })
                    .collect::<Vec<_>>(),
            );
            assert_eq!(binarize(&again, t), once, "threshold {t}");
        }
    }

    #[test]
    fn row_permutation_commutes() {
        let (w, h) = (5, 4);
        let levels: Vec<u16> = (0..w * h).map(|i| (i as u16) * 3_000).collect();
        let m = matrix(w, h, &levels);
        let out = binarize(&m, 20_000);

        let order = [2usize, 0, 3, 1];
        let permuted: Vec<u16> = order
            .iter()
            .flat_map(|&r| levels[r * w..(r + 1) * w].iter().copied())
            .collect();
        let out_p = binarize(&matrix(w, h, &permuted), 20_000);

        for (dst, &src) in order.iter().enumerate() {
            assert_eq!(out_p.row(dst), out.row(src));
        }
    }

    #[test]
    fn samples_entry_point_validates() {
        let samples = [10, 20, 30, 40, 50, 60];
        let out = binarize_samples(&samples, 2, 1, SampleLayout::RGB16, 30).expect("binarize");
        assert_eq!(out.row(0), &[false, true]);

        assert!(matches!(
            binarize_samples(&samples, 3, 1, SampleLayout::RGB16, 30),
            Err(BilevelError::InvalidGeometry { .. })
        ));
    }
}
