/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// The source image has zero width or height.
    #[error("Source image has an empty dimension ({0}x{1})")]
    DimensionMismatch(usize, usize),

    /// The size or scale used to compute a pixel radius is not usable.
    #[error("Invalid radius request: size {0} at scale {1}")]
    InvalidRadius(f32, f32),

    /// Error to create the mask.
    #[error("Failed to create mask. {0}")]
    ImageCreationError(#[from] alphamorph_image::ImageError),

    /// Error to decode or encode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error while filtering the mask.
    #[error("Failed to filter the mask. {0}")]
    MorphologyError(#[from] alphamorph_imgproc::morphology::MorphologyError),

    /// Error to encode the mask as an image.
    #[error("Failed to encode the mask. {0}")]
    EncodingError(String),
}
