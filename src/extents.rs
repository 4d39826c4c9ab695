use core::fmt;

use crate::extent::Extent;

/// Shape descriptor: one extent per dimension, rank fixed at the type level
///
/// Stored inline, no heap allocation. Constructible from a plain array or
/// from a tuple mixing type-level [`Const`](crate::extent::Const) and
/// runtime sizes:
///
/// ```
/// use stridelib::extent::Const;
/// use stridelib::extents::Extents;
///
/// let n: usize = 17;
/// let e = Extents::from((Const::<64>, n));
/// assert_eq!(e.extent(0), 64);
/// assert_eq!(e.extent(1), 17);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extents<const R: usize> {
    sizes: [usize; R],
}

impl<const R: usize> Extents<R> {
    pub const fn new(sizes: [usize; R]) -> Self {
        Self { sizes }
    }

    /// Rank = number of dimensions
    pub const fn rank(&self) -> usize {
        R
    }

    /// Extent of dimension `r`. Precondition: `r < rank`.
    #[inline(always)]
    pub fn extent(&self, r: usize) -> usize {
        self.sizes[r]
    }

    /// Total number of elements
    pub fn size(&self) -> usize {
        self.sizes.iter().product()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.sizes
    }

    /// Convert to a runtime-rank shape
    pub fn to_dynamic(&self) -> ExtentsDyn {
        ExtentsDyn {
            sizes: self.sizes.to_vec(),
        }
    }
}

impl<const R: usize> Default for Extents<R> {
    fn default() -> Self {
        Self { sizes: [0; R] }
    }
}

impl<const R: usize> From<[usize; R]> for Extents<R> {
    fn from(sizes: [usize; R]) -> Self {
        Self { sizes }
    }
}

macro_rules! impl_from_dims {
    ($(($($d:ident),+) => $r:literal),+ $(,)?) => {
        $(
            impl<$($d: Extent),+> From<($($d,)+)> for Extents<$r> {
                #[allow(non_snake_case)]
                fn from(($($d,)+): ($($d,)+)) -> Self {
                    Extents::new([$($d.get()),+])
                }
            }
        )+
    };
}

impl_from_dims!(
    (A) => 1,
    (A, B) => 2,
    (A, B, C) => 3,
    (A, B, C, D) => 4,
    (A, B, C, D, E) => 5,
    (A, B, C, D, E, F) => 6,
);

impl<const R: usize> fmt::Display for Extents<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(f, &self.sizes)
    }
}

/// Runtime-rank shape descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtentsDyn {
    sizes: Vec<usize>,
}

impl ExtentsDyn {
    pub fn new(sizes: Vec<usize>) -> Self {
        Self { sizes }
    }

    pub fn rank(&self) -> usize {
        self.sizes.len()
    }

    /// Extent of dimension `r`. Precondition: `r < rank`.
    #[inline(always)]
    pub fn extent(&self, r: usize) -> usize {
        self.sizes[r]
    }

    pub fn size(&self) -> usize {
        self.sizes.iter().product()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.sizes
    }
}

impl From<Vec<usize>> for ExtentsDyn {
    fn from(sizes: Vec<usize>) -> Self {
        Self { sizes }
    }
}

impl fmt::Display for ExtentsDyn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(f, &self.sizes)
    }
}

pub(crate) fn fmt_dims(f: &mut fmt::Formatter<'_>, dims: &[usize]) -> fmt::Result {
    if dims.len() == 1 {
        return write!(f, "{}", dims[0]);
    }
    write!(f, "(")?;
    for (i, d) in dims.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{d}")?;
    }
    write!(f, ")")
}
