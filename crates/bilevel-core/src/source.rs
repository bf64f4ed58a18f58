use crate::Pixel16;

/// Per-coordinate read access to full-precision RGB pixels.
///
/// `x` is the column and `y` the row. Callers keep `x < width()` and
/// `y < height()`; implementations may panic otherwise.
pub trait PixelSource {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn pixel(&self, x: usize, y: usize) -> Pixel16;

    fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Pixel16 {
        (**self).pixel(x, y)
    }
}
