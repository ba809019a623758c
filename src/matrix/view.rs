//! Borrowed strided views over dense storage.
//!
//! `MatView` is a read-only `nrows x ncols` window with an outer stride (the
//! leading dimension) and a storage order, so a sub-block of a larger
//! allocation can be addressed without copying. `VecView` / `VecViewMut` are
//! 1-D windows with an element increment.
//!
//! The safe constructors check the slice length and the stride once; the
//! sub-view accessors used inside the kernels only `debug_assert!` their
//! bounds and rely on slice indexing for memory safety.

use crate::error::TrmvError;

/// Memory layout of a matrix view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageOrder {
    /// Columns are contiguous; the outer stride separates columns.
    ColMajor,
    /// Rows are contiguous; the outer stride separates rows.
    RowMajor,
}

impl StorageOrder {
    /// The order of the transposed view over the same buffer.
    pub fn flipped(self) -> Self {
        match self {
            StorageOrder::ColMajor => StorageOrder::RowMajor,
            StorageOrder::RowMajor => StorageOrder::ColMajor,
        }
    }
}

/// Number of slice elements a view of `outer` lines of `inner` elements,
/// `stride` apart, spans.
fn span(inner: usize, outer: usize, stride: usize) -> usize {
    if inner == 0 || outer == 0 {
        0
    } else {
        (outer - 1) * stride + inner
    }
}

/// Read-only strided matrix view.
#[derive(Copy, Clone, Debug)]
pub struct MatView<'a, T> {
    data: &'a [T],
    nrows: usize,
    ncols: usize,
    outer_stride: usize,
    order: StorageOrder,
}

impl<'a, T: Copy> MatView<'a, T> {
    /// Wrap `data` as an `nrows x ncols` matrix whose first element is
    /// `data[0]`.
    pub fn new(
        data: &'a [T],
        nrows: usize,
        ncols: usize,
        outer_stride: usize,
        order: StorageOrder,
    ) -> Result<Self, TrmvError> {
        let (inner, outer) = match order {
            StorageOrder::ColMajor => (nrows, ncols),
            StorageOrder::RowMajor => (ncols, nrows),
        };
        if outer > 1 && outer_stride < inner {
            return Err(TrmvError::StrideTooSmall { stride: outer_stride, extent: inner });
        }
        let required = span(inner, outer, outer_stride);
        if data.len() < required {
            return Err(TrmvError::BufferTooShort { required, actual: data.len() });
        }
        Ok(Self { data, nrows, ncols, outer_stride, order })
    }

    /// Densely packed column-major matrix (`outer_stride == nrows`).
    pub fn col_major(data: &'a [T], nrows: usize, ncols: usize) -> Result<Self, TrmvError> {
        Self::new(data, nrows, ncols, nrows, StorageOrder::ColMajor)
    }

    /// Densely packed row-major matrix (`outer_stride == ncols`).
    pub fn row_major(data: &'a [T], nrows: usize, ncols: usize) -> Result<Self, TrmvError> {
        Self::new(data, nrows, ncols, ncols, StorageOrder::RowMajor)
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn outer_stride(&self) -> usize {
        self.outer_stride
    }

    pub fn order(&self) -> StorageOrder {
        self.order
    }

    /// Backing slice, starting at element `(0, 0)`.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// `(row_stride, col_stride)` in elements.
    pub fn strides(&self) -> (usize, usize) {
        match self.order {
            StorageOrder::ColMajor => (1, self.outer_stride),
            StorageOrder::RowMajor => (self.outer_stride, 1),
        }
    }

    /// Slice elements spanned by the logical matrix.
    pub fn required_len(&self) -> usize {
        match self.order {
            StorageOrder::ColMajor => span(self.nrows, self.ncols, self.outer_stride),
            StorageOrder::RowMajor => span(self.ncols, self.nrows, self.outer_stride),
        }
    }

    #[inline(always)]
    fn offset(&self, i: usize, j: usize) -> usize {
        match self.order {
            StorageOrder::ColMajor => i + j * self.outer_stride,
            StorageOrder::RowMajor => i * self.outer_stride + j,
        }
    }

    /// Entry `(i, j)`.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.nrows && j < self.ncols);
        self.data[self.offset(i, j)]
    }

    /// The `nrows x ncols` block whose top-left entry is `(i, j)`.
    pub fn submatrix(&self, i: usize, j: usize, nrows: usize, ncols: usize) -> MatView<'a, T> {
        debug_assert!(i + nrows <= self.nrows && j + ncols <= self.ncols);
        let data = if nrows == 0 || ncols == 0 {
            &self.data[..0]
        } else {
            &self.data[self.offset(i, j)..]
        };
        MatView { data, nrows, ncols, outer_stride: self.outer_stride, order: self.order }
    }

    /// The transpose, viewing the same buffer in the opposite storage order.
    pub fn transpose(&self) -> MatView<'a, T> {
        MatView {
            data: self.data,
            nrows: self.ncols,
            ncols: self.nrows,
            outer_stride: self.outer_stride,
            order: self.order.flipped(),
        }
    }
}

/// Read-only strided vector view.
#[derive(Copy, Clone, Debug)]
pub struct VecView<'a, T> {
    data: &'a [T],
    len: usize,
    incr: usize,
}

impl<'a, T: Copy> VecView<'a, T> {
    /// `len` elements of `data`, `incr` apart.
    pub fn new(data: &'a [T], len: usize, incr: usize) -> Result<Self, TrmvError> {
        if len > 1 && incr == 0 {
            return Err(TrmvError::StrideTooSmall { stride: incr, extent: 1 });
        }
        let required = span(1, len, incr);
        if data.len() < required {
            return Err(TrmvError::BufferTooShort { required, actual: data.len() });
        }
        Ok(Self { data, len, incr })
    }

    /// The whole slice with unit increment.
    pub fn contiguous(data: &'a [T]) -> Self {
        Self { data, len: data.len(), incr: 1 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn incr(&self) -> usize {
        self.incr
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> T {
        debug_assert!(i < self.len);
        self.data[i * self.incr]
    }

    /// Elements `[start, start + len)`.
    pub fn segment(&self, start: usize, len: usize) -> VecView<'a, T> {
        debug_assert!(start + len <= self.len);
        let data = if len == 0 { &self.data[..0] } else { &self.data[start * self.incr..] };
        VecView { data, len, incr: self.incr }
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<'a, T: Copy> From<&'a [T]> for VecView<'a, T> {
    fn from(data: &'a [T]) -> Self {
        VecView::contiguous(data)
    }
}

/// Mutable strided vector view; the accumulation target of the kernels.
#[derive(Debug)]
pub struct VecViewMut<'a, T> {
    data: &'a mut [T],
    len: usize,
    incr: usize,
}

impl<'a, T: Copy> VecViewMut<'a, T> {
    /// `len` elements of `data`, `incr` apart.
    pub fn new(data: &'a mut [T], len: usize, incr: usize) -> Result<Self, TrmvError> {
        if len > 1 && incr == 0 {
            return Err(TrmvError::StrideTooSmall { stride: incr, extent: 1 });
        }
        let required = span(1, len, incr);
        if data.len() < required {
            return Err(TrmvError::BufferTooShort { required, actual: data.len() });
        }
        Ok(Self { data, len, incr })
    }

    /// The whole slice with unit increment.
    pub fn contiguous(data: &'a mut [T]) -> Self {
        let len = data.len();
        Self { data, len, incr: 1 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn incr(&self) -> usize {
        self.incr
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> T {
        debug_assert!(i < self.len);
        self.data[i * self.incr]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, value: T) {
        debug_assert!(i < self.len);
        self.data[i * self.incr] = value;
    }

    pub fn fill(&mut self, value: T) {
        for i in 0..self.len {
            self.set(i, value);
        }
    }

    /// Reborrow as a shorter-lived mutable view.
    pub fn rb_mut(&mut self) -> VecViewMut<'_, T> {
        VecViewMut { data: &mut *self.data, len: self.len, incr: self.incr }
    }

    /// Read-only view of the same elements.
    pub fn as_view(&self) -> VecView<'_, T> {
        VecView { data: &*self.data, len: self.len, incr: self.incr }
    }

    /// Mutable elements `[start, start + len)`.
    pub fn segment_mut(&mut self, start: usize, len: usize) -> VecViewMut<'_, T> {
        debug_assert!(start + len <= self.len);
        let data = if len == 0 { &mut self.data[..0] } else { &mut self.data[start * self.incr..] };
        VecViewMut { data, len, incr: self.incr }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.as_view().to_vec()
    }
}

impl<'a, T: Copy + std::ops::AddAssign> VecViewMut<'a, T> {
    /// `self[i] += value`.
    #[inline(always)]
    pub fn add(&mut self, i: usize, value: T) {
        debug_assert!(i < self.len);
        self.data[i * self.incr] += value;
    }
}

impl<'a, T: Copy> From<&'a mut [T]> for VecViewMut<'a, T> {
    fn from(data: &'a mut [T]) -> Self {
        VecViewMut::contiguous(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn col_major_indexing_and_submatrix() {
        // 3x2 inside a leading dimension of 4
        let data = [1.0, 2.0, 3.0, -1.0, 4.0, 5.0, 6.0];
        let a = MatView::new(&data, 3, 2, 4, StorageOrder::ColMajor).unwrap();
        assert_eq!(a.get(0, 0), 1.0);
        assert_eq!(a.get(2, 0), 3.0);
        assert_eq!(a.get(0, 1), 4.0);
        assert_eq!(a.get(2, 1), 6.0);
        assert_eq!(a.required_len(), 7);
        let b = a.submatrix(1, 1, 2, 1);
        assert_eq!(b.get(0, 0), 5.0);
        assert_eq!(b.get(1, 0), 6.0);
    }

    #[test]
    fn transpose_flips_order_and_shape() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let a = MatView::col_major(&data, 2, 3).unwrap();
        let t = a.transpose();
        assert_eq!(t.order(), StorageOrder::RowMajor);
        assert_eq!((t.nrows(), t.ncols()), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(a.get(i, j), t.get(j, i));
            }
        }
    }

    #[test]
    fn constructors_reject_bad_buffers() {
        let data = [0.0f64; 5];
        assert_eq!(
            MatView::col_major(&data, 2, 3).unwrap_err(),
            TrmvError::BufferTooShort { required: 6, actual: 5 }
        );
        assert_eq!(
            MatView::new(&data, 3, 2, 2, StorageOrder::ColMajor).unwrap_err(),
            TrmvError::StrideTooSmall { stride: 2, extent: 3 }
        );
        assert!(VecView::new(&data, 3, 2).is_ok());
        assert!(VecView::new(&data, 4, 2).is_err());
        assert!(VecView::new(&data, 2, 0).is_err());
        // empty views never need storage
        assert!(MatView::col_major(&data[..0], 0, 7).is_ok());
    }

    #[test]
    fn strided_vector_segments() {
        let mut buf = [0.0; 7];
        let mut v = VecViewMut::new(&mut buf, 4, 2).unwrap();
        v.add(3, 1.5);
        {
            let mut seg = v.segment_mut(1, 2);
            seg.add(0, 2.0);
            seg.add(1, 3.0);
        }
        assert_eq!(v.to_vec(), vec![0.0, 2.0, 3.0, 1.5]);
        assert_eq!(buf, [0.0, 0.0, 2.0, 0.0, 3.0, 0.0, 1.5]);
    }
}
