use alphamorph_image::{Intensity, MaskBuffer};

use super::ops::{apply_with_strategy, MorphOp};
use super::{MorphologyError, StructuringElement};
use crate::parallel::ExecutionStrategy;

/// Apply `iterations` passes of `op` using the default [`ExecutionStrategy`].
///
/// See [`run_with_strategy`].
pub fn run<T: Intensity>(
    src: &MaskBuffer<T>,
    element: &StructuringElement,
    op: MorphOp,
    iterations: usize,
) -> Result<MaskBuffer<T>, MorphologyError> {
    run_with_strategy(src, element, op, iterations, ExecutionStrategy::default())
}

/// Apply a filter pass a fixed number of times.
///
/// Each pass consumes the previous pass's output and pass `n + 1` starts only
/// once pass `n` is fully written. All `iterations` passes always run, even
/// when the mask stopped changing.
///
/// # Arguments
///
/// * `src` - The source mask.
/// * `element` - The structuring element shared by every pass.
/// * `op` - Dilation or erosion.
/// * `iterations` - Number of passes. Zero returns a copy of `src`.
/// * `strategy` - How rows of each pass are distributed over worker threads.
pub fn run_with_strategy<T: Intensity>(
    src: &MaskBuffer<T>,
    element: &StructuringElement,
    op: MorphOp,
    iterations: usize,
    strategy: ExecutionStrategy,
) -> Result<MaskBuffer<T>, MorphologyError> {
    if iterations == 0 {
        return Ok(src.clone());
    }

    log::debug!(
        "{op} {}x{} mask: {} r={} x{iterations}",
        src.width(),
        src.height(),
        element.kernel_type(),
        element.radius()
    );

    let mut current = apply_with_strategy(src, element, op, strategy)?;
    for pass in 1..iterations {
        log::trace!("{op} pass {}/{iterations}", pass + 1);
        current = apply_with_strategy(&current, element, op, strategy)?;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::KernelType;

    #[test]
    fn test_zero_iterations_returns_copy() -> Result<(), MorphologyError> {
        let src = MaskBuffer::new([3, 1].into(), vec![0u8, 255, 0])?;
        let element = StructuringElement::new(KernelType::Rect, 1)?;
        let dst = run(&src, &element, MorphOp::Dilate, 0)?;
        assert_eq!(dst, src);
        assert_ne!(dst.as_slice().as_ptr(), src.as_slice().as_ptr());
        Ok(())
    }

    #[test]
    fn test_iterations_grow_one_radius_per_pass() -> Result<(), MorphologyError> {
        let mut data = vec![0u8; 9];
        data[0] = 255;
        let src = MaskBuffer::new([9, 1].into(), data)?;
        let element = StructuringElement::new(KernelType::Cross, 1)?;
        for iterations in 0..9 {
            let dst = run(&src, &element, MorphOp::Dilate, iterations)?;
            let opaque = dst.as_slice().iter().filter(|&&v| v == 255).count();
            assert_eq!(opaque, iterations + 1);
        }
        Ok(())
    }

    #[test]
    fn test_passes_run_on_stable_mask() -> Result<(), MorphologyError> {
        let src = MaskBuffer::from_size_val([4, 4].into(), 255u8);
        let element = StructuringElement::new(KernelType::Rect, 1)?;
        // one pass already clears the ring, further passes keep eating inwards
        let once = run(&src, &element, MorphOp::Erode, 1)?;
        let twice = run(&src, &element, MorphOp::Erode, 2)?;
        assert_eq!(once.as_slice().iter().filter(|&&v| v == 255).count(), 4);
        assert!(twice.as_slice().iter().all(|&v| v == 0));

        let empty = MaskBuffer::from_size_val([4, 4].into(), 0u8);
        assert_eq!(run(&empty, &element, MorphOp::Dilate, 5)?, empty);
        Ok(())
    }
}
