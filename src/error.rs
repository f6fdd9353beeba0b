use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Coordinate ({x}, {y}) is outside of a {width}x{height} buffer")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Buffer holds {actual} samples but {expected} were expected")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Dimension mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Failed to load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Worker pool unavailable: {0}")]
    WorkerUnavailable(String),

    #[error("Frame processing exceeded its deadline")]
    DeadlineExceeded,
}

pub type Result<T> = std::result::Result<T, BlobError>;
