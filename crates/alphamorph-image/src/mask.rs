use crate::{error::ImageError, intensity::Intensity};

/// Mask size in pixels
///
/// A struct to represent the size of a mask in device pixels.
///
/// # Examples
///
/// ```
/// use alphamorph_image::ImageSize;
///
/// let size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the mask in pixels
    pub width: usize,
    /// Height of the mask in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A single-channel intensity plane, typically the alpha channel of an image.
///
/// Samples are stored contiguously in row-major order, one sample per pixel.
/// A mask owns its data; every morphology pass produces a new mask and never
/// writes into its input.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskBuffer<T: Intensity> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T: Intensity> MaskBuffer<T> {
    /// Create a new mask from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the mask in pixels.
    /// * `data` - The samples of the mask in row-major order.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the mask size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphamorph_image::{ImageSize, MaskBuffer};
    ///
    /// let mask = MaskBuffer::<u8>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(mask.width(), 10);
    /// assert_eq!(mask.height(), 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.area() {
            return Err(ImageError::InvalidDataLength(data.len(), size.area()));
        }

        Ok(Self { size, data })
    }

    /// Create a new mask with every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphamorph_image::{ImageSize, MaskBuffer};
    ///
    /// let mask = MaskBuffer::from_size_val([4, 3].into(), 255u8);
    ///
    /// assert_eq!(mask.as_slice().len(), 12);
    /// assert!(mask.as_slice().iter().all(|&v| v == 255));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Self {
        Self {
            size,
            data: vec![val; size.area()],
        }
    }

    /// Get the size of the mask in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the mask in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the mask in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the samples as a slice in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the mask and return its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the sample at `(x, y)`, or `None` outside the mask.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.data.get(y * self.size.width + x)
    }

    /// Get the sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the mask, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<T, ImageError> {
        self.get(x, y).copied().ok_or(ImageError::PixelIndexOutOfBounds(
            x,
            y,
            self.size.width,
            self.size.height,
        ))
    }

    /// Set the sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the mask, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, val: T) -> Result<(), ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        self.data[y * self.size.width + x] = val;
        Ok(())
    }

    /// Return a new mask with every sample inverted.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphamorph_image::{ImageSize, MaskBuffer};
    ///
    /// let mask = MaskBuffer::new([2, 1].into(), vec![0u8, 200]).unwrap();
    ///
    /// assert_eq!(mask.inverted().as_slice(), &[255, 55]);
    /// ```
    pub fn inverted(&self) -> Self {
        Self {
            size: self.size,
            data: self.data.iter().map(|v| v.invert()).collect(),
        }
    }
}

impl MaskBuffer<u8> {
    /// Convert to a normalized floating point mask in `[0, 1]`.
    pub fn to_f32(&self) -> MaskBuffer<f32> {
        MaskBuffer {
            size: self.size,
            data: self.data.iter().map(|&v| v as f32 / 255.0).collect(),
        }
    }
}

impl MaskBuffer<f32> {
    /// Convert to an 8-bit mask, rounding and clamping each sample.
    pub fn to_u8(&self) -> MaskBuffer<u8> {
        MaskBuffer {
            size: self.size,
            data: self
                .data
                .iter()
                .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
                .collect(),
        }
    }
}
