use alphamorph_image::ImageError;

use crate::parallel::ParallelError;

/// Errors related to morphological operations.
///
/// The first three variants are argument errors: they are reported by the call
/// that received the invalid value and are never retried by the library.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MorphologyError {
    /// The structuring element radius is negative.
    #[error("radius must be >= 0, got {0}")]
    NegativeRadius(i32),

    /// The iteration count is negative.
    #[error("iteration count must be >= 0, got {0}")]
    NegativeIterations(i32),

    /// The kernel type is not one of rect, cross, diamond or disk.
    #[error("unknown kernel type: {0}")]
    UnknownKernelType(String),

    /// Error to create the output mask.
    #[error("Failed to create mask. {0}")]
    ImageError(#[from] ImageError),

    /// Error to run a filter pass on the thread pool.
    #[error("Failed to execute filter pass. {0}")]
    ParallelError(#[from] ParallelError),
}

impl MorphologyError {
    /// Whether this error comes from an invalid caller argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            MorphologyError::NegativeRadius(_)
                | MorphologyError::NegativeIterations(_)
                | MorphologyError::UnknownKernelType(_)
        )
    }
}
