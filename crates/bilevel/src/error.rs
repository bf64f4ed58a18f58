use crate::core::BilevelError;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] BilevelError),

    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "image")]
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
