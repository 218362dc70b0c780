use std::str::FromStr;

use super::MorphologyError;

/// Shapes of morphological structuring elements.
///
/// Every shape is generated on a square `(2 * radius + 1)` grid centred on the
/// anchor, so the footprint is symmetric under `(dx, dy) -> (-dx, -dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelType {
    /// A full square.
    Rect,
    /// The horizontal and vertical lines through the anchor.
    Cross,
    /// The L1 ball: `|dx| + |dy| <= radius`.
    Diamond,
    /// The L2 ball: `dx^2 + dy^2 <= radius^2`, rasterized without anti-aliasing.
    Disk,
}

impl KernelType {
    /// All kernel types, in discriminant order.
    pub const ALL: [KernelType; 4] = [
        KernelType::Rect,
        KernelType::Cross,
        KernelType::Diamond,
        KernelType::Disk,
    ];

    /// Whether the offset `(dx, dy)` belongs to a footprint of the given radius.
    ///
    /// Offsets outside the `[-radius, radius]` square are never members.
    pub fn contains(self, radius: usize, dx: isize, dy: isize) -> bool {
        let (ax, ay) = (dx.unsigned_abs(), dy.unsigned_abs());
        if ax > radius || ay > radius {
            return false;
        }
        match self {
            KernelType::Rect => true,
            KernelType::Cross => ax == 0 || ay == 0,
            KernelType::Diamond => ax as u128 + ay as u128 <= radius as u128,
            KernelType::Disk => {
                let (ax, ay, r) = (ax as u128, ay as u128, radius as u128);
                ax * ax + ay * ay <= r * r
            }
        }
    }

    /// Half-width of the horizontal run of members at vertical offset `dy`.
    ///
    /// Every row of every shape is a single run centred on `dx = 0`. Returns
    /// `None` for rows outside the footprint.
    pub fn row_half_width(self, radius: usize, dy: isize) -> Option<usize> {
        let ay = dy.unsigned_abs();
        if ay > radius {
            return None;
        }
        let half = match self {
            KernelType::Rect => radius,
            KernelType::Cross if ay == 0 => radius,
            KernelType::Cross => 0,
            KernelType::Diamond => radius - ay,
            KernelType::Disk => {
                let (ay, r) = (ay as u128, radius as u128);
                isqrt(r * r - ay * ay) as usize
            }
        };
        Some(half)
    }
}

/// Integer square root, rounded down.
fn isqrt(n: u128) -> u128 {
    let mut x = (n as f64).sqrt() as u128;
    while x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).is_some_and(|sq| sq <= n) {
        x += 1;
    }
    x
}

impl std::fmt::Display for KernelType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            KernelType::Rect => "rect",
            KernelType::Cross => "cross",
            KernelType::Diamond => "diamond",
            KernelType::Disk => "disk",
        };
        write!(f, "{name}")
    }
}

impl FromStr for KernelType {
    type Err = MorphologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rect" | "box" => Ok(KernelType::Rect),
            "cross" => Ok(KernelType::Cross),
            "diamond" => Ok(KernelType::Diamond),
            "disk" => Ok(KernelType::Disk),
            _ => Err(MorphologyError::UnknownKernelType(s.to_string())),
        }
    }
}

impl TryFrom<i32> for KernelType {
    type Error = MorphologyError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| KernelType::ALL.get(idx).copied())
            .ok_or_else(|| MorphologyError::UnknownKernelType(value.to_string()))
    }
}

/// A morphological structuring element.
///
/// Describes a `side x side` boolean footprint, `side = 2 * radius + 1`, centred
/// on the anchor. Membership is closed-form per [`KernelType`], so building an
/// element costs nothing regardless of the radius; [`StructuringElement::to_grid`]
/// materializes the row-major grid when it is needed.
///
/// The element is immutable once built and has no ties to any mask, so a single
/// element can be shared by any number of filter passes.
///
/// # Example
///
/// ```rust
/// use alphamorph_imgproc::morphology::{KernelType, StructuringElement};
///
/// let element = StructuringElement::new(KernelType::Diamond, 1).unwrap();
/// assert_eq!(element.side(), 3);
/// assert_eq!(element.num_members(), 5);
/// assert!(element.contains(0, -1));
/// assert!(!element.contains(1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructuringElement {
    kernel_type: KernelType,
    radius: usize,
}

impl StructuringElement {
    /// Generate a structuring element from a kernel type and a pixel radius.
    ///
    /// # Arguments
    ///
    /// * `kernel_type` - The shape of the footprint.
    /// * `radius` - The radius in pixels. Zero yields the single-cell identity element.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::NegativeRadius`] when `radius < 0`.
    pub fn new(kernel_type: KernelType, radius: i32) -> Result<Self, MorphologyError> {
        let radius = usize::try_from(radius).map_err(|_| MorphologyError::NegativeRadius(radius))?;
        Ok(Self::from_radius(kernel_type, radius))
    }

    /// Generate a structuring element from an unsigned radius.
    pub fn from_radius(kernel_type: KernelType, radius: usize) -> Self {
        Self {
            kernel_type,
            radius,
        }
    }

    /// Get the shape of the element.
    pub fn kernel_type(&self) -> KernelType {
        self.kernel_type
    }

    /// Get the radius of the element in pixels.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Get the side length of the square grid, always odd.
    ///
    /// Saturates for radii beyond `usize::MAX / 2`.
    pub fn side(&self) -> usize {
        self.radius.saturating_mul(2).saturating_add(1)
    }

    /// Materialize the membership grid in row-major order.
    ///
    /// Cell `(row, col)` holds the membership of the offset
    /// `(col - radius, row - radius)`. Allocates `side * side` cells.
    pub fn to_grid(&self) -> Vec<bool> {
        let r = self.radius as isize;
        (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .map(|(dx, dy)| self.contains(dx, dy))
            .collect()
    }

    /// Number of offsets that belong to the footprint, saturating at `usize::MAX`.
    pub fn num_members(&self) -> usize {
        let r = self.radius as isize;
        (-r..=r)
            .filter_map(|dy| self.row_half_width(dy))
            .fold(0usize, |acc, w| {
                acc.saturating_add(w.saturating_mul(2).saturating_add(1))
            })
    }

    /// Whether the offset `(dx, dy)` relative to the anchor is a member.
    pub fn contains(&self, dx: isize, dy: isize) -> bool {
        self.kernel_type.contains(self.radius, dx, dy)
    }

    /// Half-width of the member run at vertical offset `dy`, see
    /// [`KernelType::row_half_width`].
    pub fn row_half_width(&self, dy: isize) -> Option<usize> {
        self.kernel_type.row_half_width(self.radius, dy)
    }

    /// Iterate over the member offsets `(dx, dy)`, row by row.
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        let r = self.radius as isize;
        (-r..=r).flat_map(move |dy| {
            let w = self.row_half_width(dy).unwrap_or(0) as isize;
            (-w..=w).map(move |dx| (dx, dy))
        })
    }
}
