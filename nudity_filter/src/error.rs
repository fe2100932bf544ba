use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the adapter layer around the skin heuristic.
///
/// The analysis itself is infallible: once a pixel grid exists, a verdict is
/// always produced. Everything here is about getting pixels in or masks out.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("frame buffer holds {actual} bytes, expected {expected} for a {width}x{height} frame")]
    FrameSize {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
    },

    #[error("mask holds {actual} cells, expected {expected} for a {width}x{height} grid")]
    MaskSize {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
    },

    #[error("failed to write mask to {}: {source}", path.display())]
    MaskWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for nudity_filter operations
pub type Result<T> = std::result::Result<T, FilterError>;
