use bilevel_core::{BilevelError, Result};

/// Width x height grid of foreground (`true`) / background (`false`) bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    width: usize,
    height: usize,
    bits: Vec<bool>, // row-major, len = w*h
}

impl BinaryImage {
    pub fn from_bits(width: usize, height: usize, bits: Vec<bool>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(BilevelError::InvalidDimensions { width, height })?;
        if bits.len() != expected {
            return Err(BilevelError::InvalidGeometry {
                expected,
                got: bits.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    pub(crate) fn from_parts_unchecked(width: usize, height: usize, bits: Vec<bool>) -> Self {
        debug_assert_eq!(bits.len(), width * height);
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bit at column `x`, row `y`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.bits[y * self.width + x])
    }

    pub fn row(&self, y: usize) -> &[bool] {
        &self.bits[y * self.width..(y + 1) * self.width]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn foreground_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Share of foreground pixels in `[0, 1]`; `0.0` for an empty image.
    pub fn foreground_fraction(&self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        self.foreground_count() as f64 / self.bits.len() as f64
    }

    /// Render as an 8-bit gray image (foreground 255, background 0) for
    /// display.
    #[cfg(feature = "image")]
    pub fn to_luma8(&self) -> Result<image::GrayImage> {
        let (w, h) = (self.width, self.height);
        let dims = u32::try_from(w).ok().zip(u32::try_from(h).ok());
        let Some((w32, h32)) = dims else {
            return Err(BilevelError::InvalidDimensions {
                width: w,
                height: h,
            });
        };
        let data = self.bits.iter().map(|&b| if b { 255u8 } else { 0 }).collect();
        image::GrayImage::from_raw(w32, h32, data).ok_or(BilevelError::InvalidDimensions {
            width: w,
            height: h,
        })
    }
}
