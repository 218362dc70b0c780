use alphamorph_image::{Intensity, MaskBuffer};

use super::border::{pad_out_of_bounds, BorderValue};
use super::{MorphologyError, StructuringElement};
use crate::parallel::{ExecuteRowsExt, ExecutionStrategy};

/// The two elementary morphology operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// Maximum over the footprint. Grows opaque regions.
    Dilate,
    /// Minimum over the footprint. Shrinks opaque regions.
    Erode,
}

impl MorphOp {
    /// The dual operator under intensity inversion.
    pub fn dual(self) -> Self {
        match self {
            MorphOp::Dilate => MorphOp::Erode,
            MorphOp::Erode => MorphOp::Dilate,
        }
    }

    #[inline]
    fn combine<T: Intensity>(self, a: T, b: T) -> T {
        match self {
            MorphOp::Dilate => a.max_of(b),
            MorphOp::Erode => a.min_of(b),
        }
    }
}

impl std::fmt::Display for MorphOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MorphOp::Dilate => write!(f, "dilate"),
            MorphOp::Erode => write!(f, "erode"),
        }
    }
}

/// Apply one dilation or erosion pass using the default [`ExecutionStrategy`].
///
/// See [`apply_with_strategy`].
pub fn apply<T: Intensity>(
    src: &MaskBuffer<T>,
    element: &StructuringElement,
    op: MorphOp,
) -> Result<MaskBuffer<T>, MorphologyError> {
    apply_with_strategy(src, element, op, ExecutionStrategy::default())
}

/// Apply one dilation or erosion pass over a mask.
///
/// For every output pixel `(x, y)` the result is the maximum (dilate) or
/// minimum (erode) of `src[x + dx, y + dy]` over the member offsets of the
/// element. Offsets that leave the mask read [`BorderValue::OUT_OF_BOUNDS`].
///
/// Each footprint row is a centred horizontal run, so for each distinct run
/// width the pass computes a running extremum along every padded row and folds
/// the element rows of that width into the output. The result is identical
/// to evaluating the footprint pixel by pixel.
///
/// Members with `|dx| >= width` or `|dy| >= height` never reach a sample inside
/// the mask. They are cropped from the footprint and contribute a single
/// out-of-bounds read instead, so memory and time are bounded by the mask size
/// for any radius.
///
/// # Arguments
///
/// * `src` - The source mask. It is never modified.
/// * `element` - The structuring element.
/// * `op` - Dilation or erosion.
/// * `strategy` - How rows are distributed over worker threads.
///
/// # Returns
///
/// A new mask with the same size as `src`.
pub fn apply_with_strategy<T: Intensity>(
    src: &MaskBuffer<T>,
    element: &StructuringElement,
    op: MorphOp,
    strategy: ExecutionStrategy,
) -> Result<MaskBuffer<T>, MorphologyError> {
    let radius = element.radius();
    if radius == 0 || src.size().is_empty() {
        return Ok(src.clone());
    }

    let width = src.width();
    let height = src.height();

    // every shape reaches (radius, 0) and (0, radius), so any crop leaves
    // each output pixel with at least one out-of-bounds member
    let reach_x = radius.min(width - 1);
    let reach_y = radius.min(height - 1);
    let cropped = radius > reach_x || radius > reach_y;

    let (padded, padded_size) = pad_out_of_bounds(src, reach_x, reach_y);

    // (padded row offset, run half-width) for each element row that has members
    let rows = (0..=2 * reach_y)
        .filter_map(|ky| {
            let dy = ky as isize - reach_y as isize;
            element
                .row_half_width(dy)
                .map(|half| (ky, half.min(reach_x)))
        })
        .collect::<Vec<_>>();

    let mut run_widths = rows.iter().map(|&(_, half)| half).collect::<Vec<_>>();
    run_widths.sort_unstable();
    run_widths.dedup();

    // a cropped footprint starts every output at the out-of-bounds value,
    // otherwise the first folded row seeds it
    let mut dst = vec![T::OUT_OF_BOUNDS; width * height];
    for (n, &half) in run_widths.iter().enumerate() {
        // horizontal pass: running extremum of width `2 * half + 1` on every padded row
        let window = 2 * half + 1;
        let start = reach_x - half;
        let mut horizontal = vec![T::OUT_OF_BOUNDS; padded_size.height * width];
        horizontal.execute_rows(strategy, width, |py, dst_row| {
            let src_row = &padded[py * padded_size.width..(py + 1) * padded_size.width];
            running_extremum(&src_row[start..start + width + window - 1], window, op, dst_row);
        })?;

        // vertical pass: output row `y` folds padded row `y + ky` of every element
        // row with this run width
        let kys = rows
            .iter()
            .filter(|&&(_, w)| w == half)
            .map(|&(ky, _)| ky)
            .collect::<Vec<_>>();
        let seed = !cropped && n == 0;
        dst.execute_rows(strategy, width, |y, dst_row| {
            for (i, &ky) in kys.iter().enumerate() {
                let row = &horizontal[(y + ky) * width..(y + ky + 1) * width];
                if seed && i == 0 {
                    dst_row.copy_from_slice(row);
                } else {
                    dst_row
                        .iter_mut()
                        .zip(row.iter())
                        .for_each(|(d, &s)| *d = op.combine(*d, s));
                }
            }
        })?;
    }

    log::trace!(
        "{op} pass over {}x{} with {} r={} ({} run widths{})",
        width,
        height,
        element.kernel_type(),
        radius,
        run_widths.len(),
        if cropped { ", cropped" } else { "" }
    );

    Ok(MaskBuffer::new(src.size(), dst)?)
}

/// Running extremum over a sliding window (van Herk / Gil-Werman).
///
/// Writes `dst[i] = op(src[i..i + window])` for every `i < dst.len()`, where
/// `dst.len() == src.len() - window + 1`. Costs three comparisons per sample
/// regardless of the window length.
fn running_extremum<T: Intensity>(src: &[T], window: usize, op: MorphOp, dst: &mut [T]) {
    debug_assert_eq!(dst.len() + window - 1, src.len());

    if window == 1 {
        dst.copy_from_slice(&src[..dst.len()]);
        return;
    }

    let n = src.len();
    let mut prefix = src.to_vec();
    let mut suffix = src.to_vec();

    for block_start in (0..n).step_by(window) {
        let block_end = (block_start + window).min(n);
        for i in block_start + 1..block_end {
            prefix[i] = op.combine(prefix[i - 1], src[i]);
        }
        for i in (block_start..block_end - 1).rev() {
            suffix[i] = op.combine(suffix[i + 1], src[i]);
        }
    }

    for (i, d) in dst.iter_mut().enumerate() {
        *d = op.combine(suffix[i], prefix[i + window - 1]);
    }
}
