use crate::error::LayoutError;
use crate::mapping::StridedMapping;

/* ========================= StridedView ========================= */

/// Non-owning view of a slice through a strided mapping
///
/// The buffer is validated once, at construction, against
/// `required_span_size()`; per-element access is unchecked after that.
#[derive(Debug)]
pub struct StridedView<'a, T, const R: usize> {
    data: &'a [T],
    mapping: StridedMapping<R>,
}

pub struct StridedViewMut<'a, T, const R: usize> {
    data: &'a mut [T],
    mapping: StridedMapping<R>,
}

impl<'a, T, const R: usize> StridedView<'a, T, R> {
    pub fn new(data: &'a [T], mapping: StridedMapping<R>) -> Result<Self, LayoutError> {
        let required = mapping.required_span_size();
        if data.len() < required {
            return Err(LayoutError::BufferTooSmall {
                required,
                got: data.len(),
            });
        }
        Ok(Self { data, mapping })
    }

    pub fn mapping(&self) -> &StridedMapping<R> {
        &self.mapping
    }

    /// # Safety
    /// Every `idx[i]` must be below `extents().extent(i)`; coordinates
    /// are not checked.
    #[inline(always)]
    pub unsafe fn get(&self, idx: [usize; R]) -> &'a T {
        self.data.get_unchecked(self.mapping.offset(idx))
    }

    /// Contiguous fast path: the footprint as one flat slice, if the
    /// layout is gap-free
    pub fn as_slice(&self) -> Option<&'a [T]> {
        if self.mapping.is_contiguous() {
            Some(&self.data[..self.mapping.required_span_size()])
        } else {
            None
        }
    }
}

impl<'a, T, const R: usize> StridedViewMut<'a, T, R> {
    pub fn new(data: &'a mut [T], mapping: StridedMapping<R>) -> Result<Self, LayoutError> {
        let required = mapping.required_span_size();
        if data.len() < required {
            return Err(LayoutError::BufferTooSmall {
                required,
                got: data.len(),
            });
        }
        Ok(Self { data, mapping })
    }

    pub fn mapping(&self) -> &StridedMapping<R> {
        &self.mapping
    }

    /// # Safety
    /// Every `idx[i]` must be below `extents().extent(i)`, and the
    /// mapping's uniqueness contract must actually hold (no zero stride
    /// on a dimension of extent > 1), or aliased writes result.
    #[inline(always)]
    pub unsafe fn get_mut(&mut self, idx: [usize; R]) -> &mut T {
        self.data.get_unchecked_mut(self.mapping.offset(idx))
    }

    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        if self.mapping.is_contiguous() {
            let required = self.mapping.required_span_size();
            Some(&mut self.data[..required])
        } else {
            None
        }
    }
}

/* ========================= Tests ========================= */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extents::Extents;
    use crate::strides::Strides;

    fn mapping<const R: usize>(e: [usize; R], s: [usize; R]) -> StridedMapping<R> {
        StridedMapping::new(Extents::new(e), Strides::new(s))
    }

    #[test]
    fn view_reads_through_mapping() {
        let data: Vec<i32> = (0..6).collect();
        let v = StridedView::new(&data, mapping([2, 3], [3, 1])).unwrap();

        assert_eq!(unsafe { *v.get([0, 0]) }, 0);
        assert_eq!(unsafe { *v.get([1, 2]) }, 5);
    }

    #[test]
    fn undersized_buffer_is_rejected() {
        let data = [0i32; 5];
        let err = StridedView::new(&data, mapping([2, 3], [3, 1])).unwrap_err();
        assert_eq!(err, LayoutError::BufferTooSmall { required: 6, got: 5 });
    }

    #[test]
    fn contiguous_fast_path() {
        let data: Vec<i32> = (0..8).collect();

        let v = StridedView::new(&data, mapping([2, 3], [3, 1])).unwrap();
        assert_eq!(v.as_slice(), Some(&data[..6]));

        // padded rows, no flat slice
        let v = StridedView::new(&data, mapping([2, 3], [4, 1])).unwrap();
        assert_eq!(v.as_slice(), None);
    }

    #[test]
    fn mut_view_writes_through_mapping() {
        let mut data = vec![0i32; 6];
        let mut v = StridedViewMut::new(&mut data, mapping([2, 3], [1, 2])).unwrap();

        unsafe {
            *v.get_mut([1, 2]) = 42;
        }
        assert_eq!(data[5], 42);
    }

    #[test]
    fn transposed_view_shares_offsets() {
        // col-major read of row-major data = transpose
        let data: Vec<i32> = (0..6).collect();
        let v = StridedView::new(&data, mapping([3, 2], [1, 3])).unwrap();

        assert_eq!(unsafe { *v.get([0, 1]) }, 3);
        assert_eq!(unsafe { *v.get([2, 0]) }, 2);
    }
}
