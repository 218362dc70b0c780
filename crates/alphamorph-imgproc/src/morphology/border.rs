use alphamorph_image::{ImageSize, Intensity, MaskBuffer};

/// Border policy shared by every morphology pass.
///
/// Any sample addressed outside `[0, width) x [0, height)` reads as
/// [`BorderValue::OUT_OF_BOUNDS`], which is fully transparent for both dilation
/// and erosion. Dilation therefore spreads only from opaque pixels inside the
/// mask, and erosion eats into any shape that touches the mask edge.
///
/// The constant is provided by a blanket implementation and cannot be
/// overridden per sample type or per pass. Mixing border values between passes
/// would break the ordering properties of iterated filtering.
pub trait BorderValue: Intensity {
    /// Value read for every out-of-bounds offset.
    const OUT_OF_BOUNDS: Self;
}

impl<T: Intensity> BorderValue for T {
    const OUT_OF_BOUNDS: Self = T::TRANSPARENT;
}

/// Copy the mask into the centre of a buffer grown by `pad_x` pixels on the left
/// and right and `pad_y` pixels on the top and bottom.
///
/// The border is filled with [`BorderValue::OUT_OF_BOUNDS`].
///
/// # Returns
///
/// The padded samples in row-major order and the padded size.
pub(crate) fn pad_out_of_bounds<T: Intensity>(
    src: &MaskBuffer<T>,
    pad_x: usize,
    pad_y: usize,
) -> (Vec<T>, ImageSize) {
    let padded_size = ImageSize {
        width: src.width() + 2 * pad_x,
        height: src.height() + 2 * pad_y,
    };

    let mut padded = vec![T::OUT_OF_BOUNDS; padded_size.area()];

    if src.width() > 0 {
        let new_stride = padded_size.width;
        let row_offset = pad_y * new_stride + pad_x;

        for (src_row, dst_row) in src
            .as_slice()
            .chunks_exact(src.width())
            .zip(padded[row_offset..].chunks_mut(new_stride))
        {
            dst_row[..src.width()].copy_from_slice(src_row);
        }
    }

    (padded, padded_size)
}
