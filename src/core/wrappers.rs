//! Wrappers for faer dense matrix types.
//!
//! This module implements [`TriangularProduct`] for `faer::Mat` and `faer::MatRef`, so a
//! triangular product can be taken directly on faer matrices. The triangle is packed into a
//! column-major scratch buffer (entries outside it are skipped) and handed to the blocked
//! kernel; the vectors are plain slices.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use crate::core::traits::{Gemv, ScalarProduct};
use crate::error::TrmvError;
use crate::kernel::trmv::TriangularMatVec;
use crate::matrix::view::{MatView, VecView, VecViewMut};
use faer::{Mat, MatRef};

/// Triangular matrix-vector accumulation `y += alpha * T(A) * x`.
pub trait TriangularProduct<T: ScalarProduct<T, Output = T>> {
    /// Accumulate into `y` using the options and backend of `kernel`.
    fn tri_matvec<G: Gemv<T, T>>(
        &self,
        kernel: &TriangularMatVec<G>,
        x: &[T],
        y: &mut [T],
        alpha: T,
    ) -> Result<(), TrmvError>;
}

/// Column-major copy of the triangle `kernel` reads; other entries are zero.
fn pack_triangle<T, G>(a: MatRef<'_, T>, kernel: &TriangularMatVec<G>) -> Vec<T>
where
    T: ScalarProduct<T, Output = T>,
{
    let (m, n) = (a.nrows(), a.ncols());
    let lower = kernel.mode().is_lower();
    let mut packed = vec![T::zero(); m * n];
    for j in 0..n {
        let rows = if lower { j..m } else { 0..(j + 1).min(m) };
        for i in rows {
            packed[j * m + i] = a[(i, j)];
        }
    }
    packed
}

impl<'a, T> TriangularProduct<T> for MatRef<'a, T>
where
    T: ScalarProduct<T, Output = T>,
{
    fn tri_matvec<G: Gemv<T, T>>(
        &self,
        kernel: &TriangularMatVec<G>,
        x: &[T],
        y: &mut [T],
        alpha: T,
    ) -> Result<(), TrmvError> {
        let (m, n) = (self.nrows(), self.ncols());
        if x.len() != n || y.len() != m {
            return Err(TrmvError::DimensionMismatch(format!(
                "A is {}x{}, x has {} entries, y has {}",
                m,
                n,
                x.len(),
                y.len()
            )));
        }
        kernel.options().validate()?;
        let packed = pack_triangle(*self, kernel);
        let lhs = MatView::col_major(&packed, m, n)?;
        kernel.run(lhs, VecView::contiguous(x), VecViewMut::contiguous(y), alpha);
        Ok(())
    }
}

/// Implements the triangular product for an owned `faer::Mat` through its reference.
impl<T> TriangularProduct<T> for Mat<T>
where
    T: ScalarProduct<T, Output = T>,
{
    fn tri_matvec<G: Gemv<T, T>>(
        &self,
        kernel: &TriangularMatVec<G>,
        x: &[T],
        y: &mut [T],
        alpha: T,
    ) -> Result<(), TrmvError> {
        self.as_ref().tri_matvec(kernel, x, y, alpha)
    }
}
