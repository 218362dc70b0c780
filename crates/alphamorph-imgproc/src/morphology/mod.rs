//! Morphological filtering of single-channel masks.
//!
//! A pass replaces every sample with the maximum (dilation) or minimum (erosion)
//! over a [`StructuringElement`] centred on it. Samples outside the mask read as
//! transparent, see [`BorderValue`].
//!
//! # Example
//!
//! ```rust
//! use alphamorph_image::MaskBuffer;
//! use alphamorph_imgproc::morphology::{self, KernelType};
//!
//! let mut data = vec![0u8; 9];
//! data[4] = 255;
//! let mask = MaskBuffer::new([3, 3].into(), data).unwrap();
//!
//! let dilated = morphology::dilate(&mask, KernelType::Rect, 1, 1).unwrap();
//! assert!(dilated.as_slice().iter().all(|&v| v == 255));
//!
//! let eroded = morphology::erode(&mask, KernelType::Rect, 1, 1).unwrap();
//! assert!(eroded.as_slice().iter().all(|&v| v == 0));
//! ```

use alphamorph_image::{Intensity, MaskBuffer};

use crate::parallel::ExecutionStrategy;

/// Error types used for morphological operations.
pub mod error;
pub use error::MorphologyError;

/// Structuring element generation.
pub mod kernels;
pub use kernels::{KernelType, StructuringElement};

/// Out-of-bounds policy.
pub mod border;
pub use border::BorderValue;

/// Single dilation or erosion pass.
pub mod ops;
pub use ops::{apply, apply_with_strategy, MorphOp};

/// Fixed-count iteration of filter passes.
pub mod iterate;
pub use iterate::{run, run_with_strategy};

fn check_iterations(iterations: i32) -> Result<usize, MorphologyError> {
    usize::try_from(iterations).map_err(|_| MorphologyError::NegativeIterations(iterations))
}

/// Dilate a mask with a generated structuring element.
///
/// # Arguments
///
/// * `src` - The source mask.
/// * `kernel_type` - The footprint shape.
/// * `pixel_radius` - The footprint radius in pixels; the element side is `2 * radius + 1`.
/// * `iterations` - Number of passes.
///
/// # Errors
///
/// Negative `pixel_radius` or `iterations` are rejected before any pass runs.
pub fn dilate<T: Intensity>(
    src: &MaskBuffer<T>,
    kernel_type: KernelType,
    pixel_radius: i32,
    iterations: i32,
) -> Result<MaskBuffer<T>, MorphologyError> {
    filter(
        src,
        MorphOp::Dilate,
        kernel_type,
        pixel_radius,
        iterations,
        ExecutionStrategy::default(),
    )
}

/// Erode a mask with a generated structuring element.
///
/// Takes the same arguments as [`dilate`].
pub fn erode<T: Intensity>(
    src: &MaskBuffer<T>,
    kernel_type: KernelType,
    pixel_radius: i32,
    iterations: i32,
) -> Result<MaskBuffer<T>, MorphologyError> {
    filter(
        src,
        MorphOp::Erode,
        kernel_type,
        pixel_radius,
        iterations,
        ExecutionStrategy::default(),
    )
}

/// Dilate or erode a mask with an explicit execution strategy.
pub fn filter<T: Intensity>(
    src: &MaskBuffer<T>,
    op: MorphOp,
    kernel_type: KernelType,
    pixel_radius: i32,
    iterations: i32,
    strategy: ExecutionStrategy,
) -> Result<MaskBuffer<T>, MorphologyError> {
    let element = StructuringElement::new(kernel_type, pixel_radius)?;
    let iterations = check_iterations(iterations)?;
    run_with_strategy(src, &element, op, iterations, strategy)
}

/// Opening: erosion followed by dilation.
///
/// Removes small opaque protrusions. Both halves run `iterations` passes.
pub fn open<T: Intensity>(
    src: &MaskBuffer<T>,
    kernel_type: KernelType,
    pixel_radius: i32,
    iterations: i32,
) -> Result<MaskBuffer<T>, MorphologyError> {
    open_with_strategy(
        src,
        kernel_type,
        pixel_radius,
        iterations,
        ExecutionStrategy::default(),
    )
}

/// Opening with an explicit execution strategy for every pass.
pub fn open_with_strategy<T: Intensity>(
    src: &MaskBuffer<T>,
    kernel_type: KernelType,
    pixel_radius: i32,
    iterations: i32,
    strategy: ExecutionStrategy,
) -> Result<MaskBuffer<T>, MorphologyError> {
    let element = StructuringElement::new(kernel_type, pixel_radius)?;
    let iterations = check_iterations(iterations)?;
    let eroded = run_with_strategy(src, &element, MorphOp::Erode, iterations, strategy)?;
    run_with_strategy(&eroded, &element, MorphOp::Dilate, iterations, strategy)
}

/// Closing: dilation followed by erosion.
///
/// Fills small transparent gaps. Both halves run `iterations` passes.
pub fn close<T: Intensity>(
    src: &MaskBuffer<T>,
    kernel_type: KernelType,
    pixel_radius: i32,
    iterations: i32,
) -> Result<MaskBuffer<T>, MorphologyError> {
    close_with_strategy(
        src,
        kernel_type,
        pixel_radius,
        iterations,
        ExecutionStrategy::default(),
    )
}

/// Closing with an explicit execution strategy for every pass.
pub fn close_with_strategy<T: Intensity>(
    src: &MaskBuffer<T>,
    kernel_type: KernelType,
    pixel_radius: i32,
    iterations: i32,
    strategy: ExecutionStrategy,
) -> Result<MaskBuffer<T>, MorphologyError> {
    let element = StructuringElement::new(kernel_type, pixel_radius)?;
    let iterations = check_iterations(iterations)?;
    let dilated = run_with_strategy(src, &element, MorphOp::Dilate, iterations, strategy)?;
    run_with_strategy(&dilated, &element, MorphOp::Erode, iterations, strategy)
}
