/// Trait for the sample type of a mask.
///
/// A sample is a normalized coverage value: [`Intensity::TRANSPARENT`] is no
/// coverage at all and [`Intensity::OPAQUE`] is full coverage. Morphology only
/// needs the two extremes and an ordering, so the trait stays small.
///
/// Send and Sync are required to process rows on the rayon thread pool.
pub trait Intensity: Copy + Default + PartialOrd + Send + Sync + std::fmt::Debug + 'static {
    /// Fully transparent sample (zero coverage).
    const TRANSPARENT: Self;

    /// Fully opaque sample (maximum coverage).
    const OPAQUE: Self;

    /// Return the larger of two samples.
    fn max_of(self, other: Self) -> Self;

    /// Return the smaller of two samples.
    fn min_of(self, other: Self) -> Self;

    /// Mirror the sample inside the normalized range, i.e. `OPAQUE - self`.
    fn invert(self) -> Self;
}

impl Intensity for u8 {
    const TRANSPARENT: Self = 0;
    const OPAQUE: Self = u8::MAX;

    #[inline]
    fn max_of(self, other: Self) -> Self {
        self.max(other)
    }

    #[inline]
    fn min_of(self, other: Self) -> Self {
        self.min(other)
    }

    #[inline]
    fn invert(self) -> Self {
        Self::OPAQUE - self
    }
}

impl Intensity for u16 {
    const TRANSPARENT: Self = 0;
    const OPAQUE: Self = u16::MAX;

    #[inline]
    fn max_of(self, other: Self) -> Self {
        self.max(other)
    }

    #[inline]
    fn min_of(self, other: Self) -> Self {
        self.min(other)
    }

    #[inline]
    fn invert(self) -> Self {
        Self::OPAQUE - self
    }
}

impl Intensity for f32 {
    const TRANSPARENT: Self = 0.0;
    const OPAQUE: Self = 1.0;

    #[inline]
    fn max_of(self, other: Self) -> Self {
        self.max(other)
    }

    #[inline]
    fn min_of(self, other: Self) -> Self {
        self.min(other)
    }

    #[inline]
    fn invert(self) -> Self {
        Self::OPAQUE - self
    }
}
