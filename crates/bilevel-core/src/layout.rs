use serde::{Deserialize, Serialize};

use crate::{BilevelError, Pixel16, PixelSource, Result};

/// Interleaved sample layout of a raw raster buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleLayout {
    /// Samples per pixel.
    pub channels: usize,
    /// Bits per sample.
    pub bit_depth: u8,
}

impl SampleLayout {
    /// Three interleaved 16-bit samples per pixel in R, G, B order.
    pub const RGB16: Self = Self {
        channels: 3,
        bit_depth: 16,
    };

    /// Reject anything but [`SampleLayout::RGB16`].
    pub fn validate(&self) -> Result<()> {
        if *self == Self::RGB16 {
            Ok(())
        } else {
            Err(BilevelError::UnsupportedFormat {
                channels: self.channels,
                bit_depth: self.bit_depth,
            })
        }
    }

    /// Number of whole pixels in a buffer of `len` samples.
    ///
    /// Fails if the layout is unsupported or `len` is not a multiple of the
    /// channel count.
    pub fn pixel_count(&self, len: usize) -> Result<usize> {
        self.validate()?;
        if len % self.channels != 0 {
            return Err(BilevelError::InvalidGeometry {
                expected: (len / self.channels + 1) * self.channels,
                got: len,
            });
        }
        Ok(len / self.channels)
    }

    /// Exact buffer length for a `width` x `height` raster.
    pub fn expected_len(&self, width: usize, height: usize) -> Result<usize> {
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(self.channels))
            .ok_or(BilevelError::InvalidDimensions { width, height })
    }

    /// Validate format and geometry of `len` samples against `width` x `height`.
    pub(crate) fn check_buffer(&self, len: usize, width: usize, height: usize) -> Result<()> {
        self.validate()?;
        let expected = self.expected_len(width, height)?;
        if len != expected {
            return Err(BilevelError::InvalidGeometry { expected, got: len });
        }
        Ok(())
    }
}

impl Default for SampleLayout {
    fn default() -> Self {
        Self::RGB16
    }
}

/// Reinterpret a signed 16-bit storage cell as an unsigned sample.
#[inline]
pub fn mask_sample(raw: i16) -> u16 {
    raw as u16
}

/// Borrowed, validated view over an interleaved RGB16 sample buffer.
#[derive(Clone, Copy, Debug)]
pub struct RgbSamples<'a> {
    width: usize,
    height: usize,
    data: &'a [u16], // row-major, len = w*h*3
}

impl<'a> RgbSamples<'a> {
    pub fn new(data: &'a [u16], width: usize, height: usize, layout: SampleLayout) -> Result<Self> {
        layout.check_buffer(data.len(), width, height)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn data(&self) -> &'a [u16] {
        self.data
    }

    pub fn pixels(&self) -> impl Iterator<Item = Pixel16> + 'a {
        self.data
            .chunks_exact(SampleLayout::RGB16.channels)
            .map(|s| Pixel16::new(s[0], s[1], s[2]))
    }
}

impl PixelSource for RgbSamples<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Pixel16 {
        let off = (y * self.width + x) * SampleLayout::RGB16.channels;
        Pixel16::new(self.data[off], self.data[off + 1], self.data[off + 2])
    }
}
