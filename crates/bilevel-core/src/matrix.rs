//! Two-dimensional pixel grid built from an interleaved sample buffer.

use crate::{mask_sample, BilevelError, Pixel16, PixelSource, Result, SampleLayout};

/// Height x width grid of [`Pixel16`], row-major and immutable once built.
///
/// Element `(row, col)` is the pixel whose samples start at offset
/// `(row * width + col) * channels` in the source buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelMatrix {
    width: usize,
    height: usize,
    pixels: Vec<Pixel16>,
}

impl PixelMatrix {
    /// Build a matrix from an unsigned sample buffer.
    pub fn build(
        samples: &[u16],
        width: usize,
        height: usize,
        layout: SampleLayout,
    ) -> Result<Self> {
        layout.check_buffer(samples.len(), width, height)?;
        let pixels = samples
            .chunks_exact(layout.channels)
            .map(|s| Pixel16::new(s[0], s[1], s[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a matrix from signed 16-bit storage, masking each sample to
    /// its unsigned value on read.
    pub fn build_signed(
        samples: &[i16],
        width: usize,
        height: usize,
        layout: SampleLayout,
    ) -> Result<Self> {
        layout.check_buffer(samples.len(), width, height)?;
        let pixels = samples
            .chunks_exact(layout.channels)
            .map(|s| Pixel16::new(mask_sample(s[0]), mask_sample(s[1]), mask_sample(s[2])))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an already structured row-major pixel vector.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel16>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(BilevelError::InvalidDimensions { width, height })?;
        if pixels.len() != expected {
            return Err(BilevelError::InvalidGeometry {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of rows; equals [`height`](Self::height).
    pub fn rows(&self) -> usize {
        self.height
    }

    /// Number of columns; equals [`width`](Self::width).
    pub fn cols(&self) -> usize {
        self.width
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Pixel16> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.pixels[row * self.width + col])
    }

    pub fn row(&self, row: usize) -> &[Pixel16] {
        &self.pixels[row * self.width..(row + 1) * self.width]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Pixel16]> {
        // `chunks_exact(0)` panics; an empty-width matrix has no pixels anyway.
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn as_slice(&self) -> &[Pixel16] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel16> {
        self.pixels
    }
}

impl PixelSource for PixelMatrix {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Pixel16 {
        self.pixels[y * self.width + x]
    }
}
