use core::fmt;

/// Per-dimension extent usable in shape construction: either the
/// zero-sized [`Const`] (size fixed at the type level) or a plain
/// `usize` (size supplied at runtime).
///
/// The two can be mixed freely in one shape, see
/// [`Extents::from`](crate::extents::Extents).
pub trait Extent: Copy + fmt::Debug {
    /// The size, when it is known at compile time
    const FIXED: Option<usize>;

    /// Concrete value of the extent
    fn get(self) -> usize;
}

/// Type-level constant extent; occupies no space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Const<const N: usize>;

impl<const N: usize> Extent for Const<N> {
    const FIXED: Option<usize> = Some(N);

    #[inline(always)]
    fn get(self) -> usize {
        N
    }
}

impl Extent for usize {
    const FIXED: Option<usize> = None;

    #[inline(always)]
    fn get(self) -> usize {
        self
    }
}

/// Fixed extents are prefixed with `_`
impl<const N: usize> fmt::Display for Const<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}", N)
    }
}
