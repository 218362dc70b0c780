use std::path::Path;

use alphamorph_image::MaskBuffer;
use alphamorph_imgproc::morphology::{self, KernelType, MorphOp};
use alphamorph_imgproc::parallel::ExecutionStrategy;
use image::{DynamicImage, GrayImage};

use crate::adapter::{encode_as_image, pixel_radius, MaskSource};
use crate::error::IoError;

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// The decoded image.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<DynamicImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let image = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "read {} ({}x{}, {:?})",
        file_path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image)
}

/// Writes a mask as a grayscale image.
///
/// The format follows the file extension, as in [`image::save_buffer`].
///
/// # Arguments
///
/// * `file_path` - The destination path.
/// * `mask` - The mask to encode.
pub fn write_mask(file_path: impl AsRef<Path>, mask: &MaskBuffer<u8>) -> Result<(), IoError> {
    let gray = encode_as_image(mask)?;
    gray.save(file_path.as_ref())?;
    Ok(())
}

/// Extract the alpha plane of `source`, filter it and return it as a grayscale image.
///
/// `size` is the structuring element radius in points; it is converted to
/// `round(size * source.scale_factor())` pixels, so the element side is
/// `2 * size * scale + 1` pixels.
///
/// # Arguments
///
/// * `source` - The image to take the alpha plane from.
/// * `op` - Dilation or erosion.
/// * `kernel_type` - The footprint shape.
/// * `size` - The radius in points.
/// * `iterations` - Number of passes.
pub fn mask_image(
    source: &impl MaskSource,
    op: MorphOp,
    kernel_type: KernelType,
    size: f32,
    iterations: i32,
) -> Result<GrayImage, IoError> {
    let mask = source.extract_intensity_channel()?;
    let radius = pixel_radius(size, source.scale_factor())?;

    log::debug!(
        "{op} alpha mask {}x{} with {kernel_type} of {size}pt ({radius}px) x{iterations}",
        mask.width(),
        mask.height()
    );

    let filtered = morphology::filter(
        &mask,
        op,
        kernel_type,
        radius,
        iterations,
        ExecutionStrategy::default(),
    )?;

    encode_as_image(&filtered)
}

/// Extract the alpha plane of `source`, dilate it and return it as a grayscale image.
///
/// See [`mask_image`].
pub fn mask_image_dilated(
    source: &impl MaskSource,
    kernel_type: KernelType,
    size: f32,
    iterations: i32,
) -> Result<GrayImage, IoError> {
    mask_image(source, MorphOp::Dilate, kernel_type, size, iterations)
}

/// Extract the alpha plane of `source`, erode it and return it as a grayscale image.
///
/// See [`mask_image`].
pub fn mask_image_eroded(
    source: &impl MaskSource,
    kernel_type: KernelType,
    size: f32,
    iterations: i32,
) -> Result<GrayImage, IoError> {
    mask_image(source, MorphOp::Erode, kernel_type, size, iterations)
}
