use core::fmt;

use crate::extents::fmt_dims;

/// Stride sequence: storage elements to advance per unit step in each
/// dimension, rank fixed at the type level
///
/// Strides are assumed non-negative. Nothing here relates them to any
/// shape: padded, transposed and overlapping layouts are all expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strides<const R: usize> {
    strides: [usize; R],
}

impl<const R: usize> Strides<R> {
    pub const fn new(strides: [usize; R]) -> Self {
        Self { strides }
    }

    pub const fn rank(&self) -> usize {
        R
    }

    /// Stride of dimension `r`. Precondition: `r < rank`.
    #[inline(always)]
    pub fn stride(&self, r: usize) -> usize {
        self.strides[r]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.strides
    }

    /// Convert to a runtime-rank stride sequence
    pub fn to_dynamic(&self) -> StridesDyn {
        StridesDyn {
            strides: self.strides.to_vec(),
        }
    }
}

impl<const R: usize> Default for Strides<R> {
    fn default() -> Self {
        Self { strides: [0; R] }
    }
}

impl<const R: usize> From<[usize; R]> for Strides<R> {
    fn from(strides: [usize; R]) -> Self {
        Self { strides }
    }
}

impl<const R: usize> fmt::Display for Strides<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(f, &self.strides)
    }
}

/// Runtime-rank stride sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StridesDyn {
    strides: Vec<usize>,
}

impl StridesDyn {
    pub fn new(strides: Vec<usize>) -> Self {
        Self { strides }
    }

    pub fn rank(&self) -> usize {
        self.strides.len()
    }

    /// Stride of dimension `r`. Precondition: `r < rank`.
    #[inline(always)]
    pub fn stride(&self, r: usize) -> usize {
        self.strides[r]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.strides
    }
}

impl From<Vec<usize>> for StridesDyn {
    fn from(strides: Vec<usize>) -> Self {
        Self { strides }
    }
}

impl fmt::Display for StridesDyn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(f, &self.strides)
    }
}
