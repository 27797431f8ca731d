//! Error types for synthesis jobs, dispatch and file adapters

use std::path::PathBuf;

/// Main error type for all synthesis operations
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Failed to load source image from filesystem
    #[error("Failed to load image '{}': {source}", .path.display())]
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save generated image to disk
    #[error("Failed to export image to '{}': {source}", .path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Job configuration validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pixel data length disagrees with the declared dimensions
    #[error(
        "Buffer size mismatch for {width}x{height} image: expected {expected} bytes, got {actual}"
    )]
    BufferSizeMismatch {
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Byte length implied by the dimensions
        expected: usize,
        /// Byte length actually supplied
        actual: usize,
    },

    /// Requested image exceeds the supported dimension limit
    #[error("Image size {width}x{height} exceeds the maximum dimension of {max}")]
    DimensionTooLarge {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
        /// Maximum allowed width or height
        max: u32,
    },

    /// A job observed its cancellation token
    #[error("Job {job} was cancelled")]
    Cancelled {
        /// Identifier of the cancelled job
        job: u64,
    },

    /// The worker pool can no longer accept or deliver jobs
    #[error("Worker pool error: {reason}")]
    WorkerPool {
        /// Description of the failure
        reason: String,
    },

    /// Some jobs of a batch run produced no result
    #[error("{failed} of {total} jobs failed")]
    BatchFailed {
        /// Number of failed jobs
        failed: usize,
        /// Number of jobs in the batch
        total: usize,
    },

    /// Job manifest could not be parsed
    #[error("Failed to parse manifest '{}': {source}", .path.display())]
    Manifest {
        /// Path to the manifest file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", .path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, SynthError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SynthError {
    SynthError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a worker pool error
pub fn pool_error(reason: &impl ToString) -> SynthError {
    SynthError::WorkerPool {
        reason: reason.to_string(),
    }
}
