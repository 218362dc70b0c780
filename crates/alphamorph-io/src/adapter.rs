use std::path::Path;

use alphamorph_image::{ImageSize, MaskBuffer};
use image::{DynamicImage, GenericImageView, GrayImage};

use crate::error::IoError;

/// A source image that can hand its coverage plane to the morphology core.
pub trait MaskSource {
    /// Extract one 8-bit coverage sample per device pixel.
    fn extract_intensity_channel(&self) -> Result<MaskBuffer<u8>, IoError>;

    /// Number of device pixels per logical point.
    fn scale_factor(&self) -> f32 {
        1.0
    }
}

impl MaskSource for DynamicImage {
    fn extract_intensity_channel(&self) -> Result<MaskBuffer<u8>, IoError> {
        extract_intensity_channel(self)
    }
}

/// An image paired with the device scale factor it was authored for.
///
/// A `@2x` asset is twice as dense as its point size, so a radius requested in
/// points covers twice as many pixels.
pub struct ScaledImage {
    /// The decoded image in device pixels.
    pub image: DynamicImage,
    /// Device pixels per point. Must be finite and positive.
    pub scale: f32,
}

impl ScaledImage {
    /// Wrap an image with an explicit scale factor.
    pub fn new(image: DynamicImage, scale: f32) -> Self {
        Self { image, scale }
    }

    /// Open an image and take its scale from an `@Nx` file-name suffix.
    ///
    /// `glow@2x.png` opens with scale 2, `glow.png` with scale 1.
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file_path = file_path.as_ref();
        let image = crate::functional::read_image_any(file_path)?;
        let scale = file_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(scale_from_stem)
            .unwrap_or(1.0);
        Ok(Self { image, scale })
    }
}

impl MaskSource for ScaledImage {
    fn extract_intensity_channel(&self) -> Result<MaskBuffer<u8>, IoError> {
        extract_intensity_channel(&self.image)
    }

    fn scale_factor(&self) -> f32 {
        self.scale
    }
}

fn scale_from_stem(stem: &str) -> Option<f32> {
    let (_, suffix) = stem.rsplit_once('@')?;
    let scale = suffix.strip_suffix('x')?.parse::<f32>().ok()?;
    (scale.is_finite() && scale > 0.0).then_some(scale)
}

/// Extract the alpha plane of an image as a mask.
///
/// Images without an alpha channel are fully opaque, so they yield a uniform
/// 255 mask. Wider sample types are reduced to 8 bits.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] when the image has zero width or height.
pub fn extract_intensity_channel(image: &DynamicImage) -> Result<MaskBuffer<u8>, IoError> {
    let (width, height) = image.dimensions();
    let size = ImageSize {
        width: width as usize,
        height: height as usize,
    };

    if size.is_empty() {
        return Err(IoError::DimensionMismatch(size.width, size.height));
    }

    if !image.color().has_alpha() {
        return Ok(MaskBuffer::from_size_val(size, u8::MAX));
    }

    let alpha: Vec<u8> = match image {
        DynamicImage::ImageLumaA8(img) => img.pixels().map(|p| p.0[1]).collect(),
        DynamicImage::ImageRgba8(img) => img.pixels().map(|p| p.0[3]).collect(),
        _ => image.to_rgba8().pixels().map(|p| p.0[3]).collect(),
    };

    Ok(MaskBuffer::new(size, alpha)?)
}

/// Encode a mask as a single-channel grayscale image of the same size.
pub fn encode_as_image(mask: &MaskBuffer<u8>) -> Result<GrayImage, IoError> {
    GrayImage::from_raw(
        mask.width() as u32,
        mask.height() as u32,
        mask.as_slice().to_vec(),
    )
    .ok_or_else(|| {
        IoError::EncodingError(format!(
            "buffer does not fit a {}x{} image",
            mask.width(),
            mask.height()
        ))
    })
}

/// Convert a radius in points to a radius in device pixels.
///
/// Computes `round(size * scale)`. The morphology core only ever sees pixels.
///
/// # Errors
///
/// Returns [`IoError::InvalidRadius`] for non-finite inputs or a result that
/// does not fit an `i32`.
pub fn pixel_radius(size: f32, scale: f32) -> Result<i32, IoError> {
    // i32::MIN is exact in f32, i32::MAX is not: accept [-2^31, 2^31)
    let bound = -(i32::MIN as f32);
    let radius = (size * scale).round();
    if !radius.is_finite() || radius >= bound || radius < -bound {
        return Err(IoError::InvalidRadius(size, scale));
    }
    Ok(radius as i32)
}
