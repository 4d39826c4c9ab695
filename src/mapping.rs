use crate::error::LayoutError;
use crate::extents::{Extents, ExtentsDyn};
use crate::strides::{Strides, StridesDyn};

/// Mapping from a multidimensional index to a linear storage offset,
/// with one explicit stride per dimension
///
/// Immutable after construction; copy freely. A shared instance is safe
/// for concurrent reads as long as no thread assigns to it.
///
/// Indices are never checked against the extents: an out-of-range
/// coordinate silently produces an offset outside the layout's nominal
/// footprint. The only structural constraint, stride count == rank, is
/// enforced by the type.
#[derive(Debug, Clone, Copy, Default)]
pub struct StridedMapping<const R: usize> {
    extents: Extents<R>,
    strides: Strides<R>,
}

impl<const R: usize> StridedMapping<R> {
    pub const fn new(extents: Extents<R>, strides: Strides<R>) -> Self {
        Self { extents, strides }
    }

    pub fn extents(&self) -> Extents<R> {
        self.extents
    }

    pub fn strides(&self) -> Strides<R> {
        self.strides
    }

    /// Stride of dimension `r`. Precondition: `r < rank`.
    #[inline(always)]
    pub fn stride(&self, r: usize) -> usize {
        self.strides.stride(r)
    }

    pub const fn rank(&self) -> usize {
        R
    }

    /// Linear offset of `idx`: Σ idx[i] * stride(i)
    #[inline(always)]
    pub fn offset(&self, idx: [usize; R]) -> usize {
        let mut acc = 0;
        for i in 0..R {
            acc += idx[i] * self.strides.stride(i);
        }
        acc
    }

    /// One past the maximum offset reachable by any in-bounds index;
    /// the minimum buffer length this layout can safely address.
    ///
    /// Any zero extent makes the index set empty, so the result is 0
    /// rather than letting `extent - 1` wrap.
    pub fn required_span_size(&self) -> usize {
        let mut last = 0;
        for i in 0..R {
            let e = self.extents.extent(i);
            if e == 0 {
                return 0;
            }
            last += (e - 1) * self.strides.stride(i);
        }
        last + 1
    }

    /// Always true. The layout family claims distinct indices yield
    /// distinct offsets; this is not verified, and a zero stride on a
    /// dimension of extent > 1 does produce collisions. Callers get the
    /// contractual answer, not a computed one.
    pub const fn is_unique(&self) -> bool {
        true
    }

    /// Always true: every instance is strided by definition.
    pub const fn is_strided(&self) -> bool {
        true
    }

    /// True iff some ordering of the dimensions forms one gap-free block
    pub fn is_contiguous(&self) -> bool {
        let mut consumed = [false; R];
        contiguous_scan(self.extents.as_slice(), self.strides.as_slice(), &mut consumed)
    }

    pub const fn is_always_unique() -> bool {
        true
    }

    /// Contiguity depends on the runtime strides, never guaranteed
    pub const fn is_always_contiguous() -> bool {
        false
    }

    pub const fn is_always_strided() -> bool {
        true
    }
}

/// Equality compares strides only; extents are deliberately ignored, so
/// two mappings with the same strides but different shapes are equal.
/// A known quirk of this layout family, kept deliberately. Mappings of
/// different rank are different types and never reach this comparison.
impl<const R: usize> PartialEq for StridedMapping<R> {
    fn eq(&self, other: &Self) -> bool {
        self.strides.as_slice() == other.strides.as_slice()
    }
}

impl<const R: usize> Eq for StridedMapping<R> {}

/// Runtime-rank strided mapping
///
/// Same semantics as [`StridedMapping`], with the rank check moved from
/// the type level to a construction-time error.
#[derive(Debug, Clone, Default)]
pub struct StridedMappingDyn {
    extents: ExtentsDyn,
    strides: StridesDyn,
}

impl StridedMappingDyn {
    /// Rejects stride sequences whose length differs from the shape's rank
    pub fn new(extents: ExtentsDyn, strides: StridesDyn) -> Result<Self, LayoutError> {
        if extents.rank() != strides.rank() {
            return Err(LayoutError::RankMismatch {
                expected: extents.rank(),
                got: strides.rank(),
            });
        }
        Ok(Self { extents, strides })
    }

    pub fn extents(&self) -> &ExtentsDyn {
        &self.extents
    }

    pub fn strides(&self) -> &StridesDyn {
        &self.strides
    }

    /// Stride of dimension `r`. Precondition: `r < rank`.
    #[inline(always)]
    pub fn stride(&self, r: usize) -> usize {
        self.strides.stride(r)
    }

    pub fn rank(&self) -> usize {
        self.extents.rank()
    }

    /// Linear offset of `idx`. Precondition: `idx.len() == rank`.
    #[inline(always)]
    pub fn offset(&self, idx: &[usize]) -> usize {
        debug_assert_eq!(idx.len(), self.rank());
        let mut acc = 0;
        for i in 0..self.rank() {
            acc += idx[i] * self.strides.stride(i);
        }
        acc
    }

    pub fn required_span_size(&self) -> usize {
        let mut last = 0;
        for i in 0..self.rank() {
            let e = self.extents.extent(i);
            if e == 0 {
                return 0;
            }
            last += (e - 1) * self.strides.stride(i);
        }
        last + 1
    }

    /// Always true; see [`StridedMapping::is_unique`]
    pub fn is_unique(&self) -> bool {
        true
    }

    pub fn is_strided(&self) -> bool {
        true
    }

    pub fn is_contiguous(&self) -> bool {
        let mut consumed = vec![false; self.rank()];
        contiguous_scan(self.extents.as_slice(), self.strides.as_slice(), &mut consumed)
    }

    pub const fn is_always_unique() -> bool {
        true
    }

    pub const fn is_always_contiguous() -> bool {
        false
    }

    pub const fn is_always_strided() -> bool {
        true
    }
}

/// Strides-only equality, as for [`StridedMapping`]. Rank here is a
/// runtime property, so mismatched ranks answer false outright instead
/// of being silently zip-compared.
impl PartialEq for StridedMappingDyn {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank() && self.strides.as_slice() == other.strides.as_slice()
    }
}

impl Eq for StridedMappingDyn {}

/// Greedy scan for a gap-free ordering of the dimensions
///
/// Seeds on the first dimension with stride 1, then repeatedly consumes
/// the first remaining dimension whose stride equals the footprint of
/// everything consumed so far. First match wins in dimension-index
/// order; ties only arise for degenerate extents of 1, where any choice
/// gives the same answer.
fn contiguous_scan(extents: &[usize], strides: &[usize], consumed: &mut [bool]) -> bool {
    let rank = extents.len();
    let first = match (0..rank).find(|&i| strides[i] == 1) {
        Some(i) => i,
        None => return false,
    };
    consumed[first] = true;
    let mut footprint = extents[first] * strides[first];

    for _ in 1..rank {
        match (0..rank).find(|&i| !consumed[i] && strides[i] == footprint) {
            Some(i) => {
                consumed[i] = true;
                footprint = strides[i] * extents[i];
            }
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping<const R: usize>(e: [usize; R], s: [usize; R]) -> StridedMapping<R> {
        StridedMapping::new(Extents::new(e), Strides::new(s))
    }

    #[test]
    fn zero_index_maps_to_zero() {
        let m = mapping([2, 3, 4], [10, 4, 1]);
        assert_eq!(m.offset([0, 0, 0]), 0);
    }

    #[test]
    fn row_major_offsets() {
        let m = mapping([2, 3], [3, 1]);
        assert_eq!(m.offset([1, 2]), 5);
        assert_eq!(m.required_span_size(), 6);
        assert!(m.is_contiguous());
    }

    #[test]
    fn col_major_offsets() {
        let m = mapping([2, 3], [1, 2]);
        assert_eq!(m.offset([1, 2]), 5);
        assert_eq!(m.required_span_size(), 6);
        assert!(m.is_contiguous());
    }

    #[test]
    fn padded_rows_are_not_contiguous() {
        // row pitch 4 leaves a one-element gap per row
        let m = mapping([2, 3], [4, 1]);
        assert!(!m.is_contiguous());
        assert_eq!(m.required_span_size(), 7);
    }

    #[test]
    fn permuted_dims_are_contiguous() {
        // d0 innermost, then d2, then d1
        let m = mapping([2, 3, 4], [1, 8, 2]);
        assert!(m.is_contiguous());
        assert_eq!(m.required_span_size(), 24);
    }

    #[test]
    fn no_unit_stride_is_not_contiguous() {
        let m = mapping([2, 3], [6, 2]);
        assert!(!m.is_contiguous());
    }

    #[test]
    fn flags_are_contractual_even_for_degenerate_strides() {
        // zero stride collides offsets, the contract answers true anyway
        let m = mapping([2, 3], [0, 1]);
        assert!(m.is_unique());
        assert!(m.is_strided());
    }

    #[test]
    fn static_capability_queries() {
        assert!(StridedMapping::<2>::is_always_unique());
        assert!(!StridedMapping::<2>::is_always_contiguous());
        assert!(StridedMapping::<2>::is_always_strided());
    }

    #[test]
    fn equality_ignores_extents() {
        let a = mapping([2, 3], [3, 1]);
        let b = mapping([5, 7], [3, 1]);
        assert_eq!(a, b);

        let c = mapping([2, 3], [4, 1]);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_extent_spans_nothing() {
        let m = mapping([2, 0, 4], [12, 4, 1]);
        assert_eq!(m.required_span_size(), 0);
    }

    #[test]
    fn default_mapping_is_all_zero() {
        let m = StridedMapping::<2>::default();
        assert_eq!(m.offset([0, 0]), 0);
        assert_eq!(m.stride(0), 0);
        assert_eq!(m.required_span_size(), 0);
    }

    #[test]
    fn rank_zero_mapping() {
        let m = StridedMapping::<0>::new(Extents::new([]), Strides::new([]));
        assert_eq!(m.offset([]), 0);
        assert_eq!(m.required_span_size(), 1);
        assert!(!m.is_contiguous());
    }

    #[test]
    fn mapping_over_mixed_dims() {
        use crate::extent::Const;

        let m = StridedMapping::new((Const::<2>, 3usize).into(), Strides::new([3, 1]));
        assert_eq!(m.offset([1, 2]), 5);
        assert_eq!(m.required_span_size(), 6);
        assert!(m.is_contiguous());
    }

    #[test]
    fn accessors_return_construction_values() {
        let m = mapping([2, 3], [7, 2]);
        assert_eq!(m.extents().as_slice(), &[2, 3]);
        assert_eq!(m.strides().as_slice(), &[7, 2]);
        assert_eq!(m.stride(0), 7);
        assert_eq!(m.rank(), 2);
    }

    fn dyn_mapping(e: Vec<usize>, s: Vec<usize>) -> StridedMappingDyn {
        StridedMappingDyn::new(ExtentsDyn::new(e), StridesDyn::new(s)).unwrap()
    }

    #[test]
    fn dyn_rank_mismatch_is_rejected() {
        let err = StridedMappingDyn::new(
            ExtentsDyn::new(vec![2, 3]),
            StridesDyn::new(vec![3, 1, 9]),
        )
        .unwrap_err();
        assert_eq!(err, crate::error::LayoutError::RankMismatch { expected: 2, got: 3 });
    }

    #[test]
    fn dyn_matches_static_semantics() {
        let m = dyn_mapping(vec![2, 3], vec![3, 1]);
        assert_eq!(m.offset(&[1, 2]), 5);
        assert_eq!(m.required_span_size(), 6);
        assert!(m.is_contiguous());
        assert!(m.is_unique());
        assert!(m.is_strided());
    }

    #[test]
    fn dyn_zero_extent_spans_nothing() {
        let m = dyn_mapping(vec![2, 0, 4], vec![12, 4, 1]);
        assert_eq!(m.required_span_size(), 0);
    }

    #[test]
    fn dyn_rank_zero_mapping() {
        let m = dyn_mapping(vec![], vec![]);
        assert_eq!(m.offset(&[]), 0);
        assert_eq!(m.required_span_size(), 1);
        assert!(!m.is_contiguous());
    }

    #[test]
    fn dyn_no_unit_stride_is_not_contiguous() {
        let m = dyn_mapping(vec![2, 3], vec![6, 2]);
        assert!(!m.is_contiguous());
    }

    #[test]
    fn dyn_equality_rejects_rank_mismatch() {
        let a = dyn_mapping(vec![2, 3], vec![3, 1]);
        let b = dyn_mapping(vec![2, 3, 4], vec![3, 1, 12]);
        assert_ne!(a, b);

        let c = dyn_mapping(vec![9, 9], vec![3, 1]);
        assert_eq!(a, c);
    }
}
