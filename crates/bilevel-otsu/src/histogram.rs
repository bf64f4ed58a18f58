use bilevel_core::{gray16, BilevelError, PixelSource, Result, SampleLayout, GRAY_LEVELS};

/// Largest pixel count a single histogram pass can hold.
pub const HISTOGRAM_CAPACITY: usize = u32::MAX as usize;

/// Fail with [`BilevelError::CapacityExceeded`] if `pixels` cannot be counted
/// by 32-bit buckets.
pub fn check_capacity(pixels: usize) -> Result<()> {
    if pixels > HISTOGRAM_CAPACITY {
        return Err(BilevelError::CapacityExceeded {
            pixels,
            capacity: HISTOGRAM_CAPACITY,
        });
    }
    Ok(())
}

/// Pixel counts per 16-bit gray level.
///
/// Invariant: the buckets sum to [`total`](Self::total).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayHistogram {
    buckets: Vec<u32>,
    total: u64,
}

impl GrayHistogram {
    pub fn new() -> Self {
        Self {
            buckets: vec![0; GRAY_LEVELS],
            total: 0,
        }
    }

    /// Histogram of an interleaved sample buffer.
    pub fn from_samples(samples: &[u16], layout: SampleLayout) -> Result<Self> {
        let pixels = layout.pixel_count(samples.len())?;
        check_capacity(pixels)?;

        let mut hist = Self::new();
        for s in samples.chunks_exact(layout.channels) {
            hist.add(gray16(s[0], s[1], s[2]));
        }
        Ok(hist)
    }

    /// Histogram of every pixel of `src`.
    pub fn from_source<S: PixelSource + ?Sized>(src: &S) -> Result<Self> {
        check_capacity(src.pixel_count())?;

        let mut hist = Self::new();
        for y in 0..src.height() {
            for x in 0..src.width() {
                hist.add(src.pixel(x, y).gray());
            }
        }
        Ok(hist)
    }

    #[inline]
    fn add(&mut self, level: u16) {
        self.buckets[level as usize] += 1;
        self.total += 1;
    }

    /// Elementwise sum with a histogram of another shard of the same image.
    pub fn merge(&mut self, other: &GrayHistogram) -> Result<()> {
        let total = self.total + other.total;
        check_capacity(usize::try_from(total).unwrap_or(usize::MAX))?;
        for (a, b) in self.buckets.iter_mut().zip(&other.buckets) {
            *a += *b;
        }
        self.total = total;
        Ok(())
    }

    pub fn bucket(&self, level: u16) -> u32 {
        self.buckets[level as usize]
    }

    pub fn buckets(&self) -> &[u32] {
        &self.buckets
    }

    /// Number of pixels counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `sum(level * count)` over all levels.
    pub fn total_intensity(&self) -> f64 {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, &h)| i as f64 * h as f64)
            .sum()
    }

    pub fn non_empty_levels(&self) -> usize {
        self.buckets.iter().filter(|&&h| h > 0).count()
    }
}

impl Default for GrayHistogram {
    fn default() -> Self {
        Self::new()
    }
}
