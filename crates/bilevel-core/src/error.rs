/// Errors shared by every stage of the binarization pipeline.
///
/// All variants are local, synchronous failures raised before any output is
/// allocated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BilevelError {
    #[error("invalid sample buffer length (expected {expected} samples, got {got})")]
    InvalidGeometry { expected: usize, got: usize },

    #[error("invalid raster dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{pixels} pixels exceed the histogram capacity of {capacity}")]
    CapacityExceeded { pixels: usize, capacity: usize },

    #[error("unsupported sample format ({channels} channels, {bit_depth}-bit); expected 3-channel 16-bit RGB")]
    UnsupportedFormat { channels: usize, bit_depth: u8 },
}

pub type Result<T> = std::result::Result<T, BilevelError>;
