//! Checked entry points over the raw kernel: `op(A)` selection and the
//! BLAS-style in-place product.

use crate::config::mode::Transpose;
use crate::core::traits::{Gemv, Product, Scalar, ScalarProduct};
use crate::error::TrmvError;
use crate::kernel::trmv::TriangularMatVec;
use crate::matrix::view::{MatView, VecView, VecViewMut};

impl<G> TriangularMatVec<G> {
    /// `res += alpha * op(T(lhs)) * rhs` with dimension checks.
    ///
    /// `Trans` and `ConjTrans` run the kernel on the transposed view of
    /// `lhs` (opposite storage order, opposite triangle), so no data is
    /// copied.
    pub fn apply<L, R>(
        &self,
        trans: Transpose,
        lhs: MatView<'_, L>,
        rhs: VecView<'_, R>,
        res: VecViewMut<'_, Product<L, R>>,
        alpha: Product<L, R>,
    ) -> Result<(), TrmvError>
    where
        L: ScalarProduct<R>,
        R: Scalar,
        G: Gemv<L, R> + Clone,
    {
        self.options().validate()?;
        let op_lhs = match trans {
            Transpose::NoTrans => lhs,
            Transpose::Trans | Transpose::ConjTrans => lhs.transpose(),
        };
        if rhs.len() != op_lhs.ncols() {
            return Err(TrmvError::DimensionMismatch(format!(
                "op(A) is {}x{} (trans={}) but rhs has {} entries",
                op_lhs.nrows(),
                op_lhs.ncols(),
                trans.to_char(),
                rhs.len()
            )));
        }
        if res.len() != op_lhs.nrows() {
            return Err(TrmvError::DimensionMismatch(format!(
                "op(A) is {}x{} (trans={}) but res has {} entries",
                op_lhs.nrows(),
                op_lhs.ncols(),
                trans.to_char(),
                res.len()
            )));
        }
        match trans {
            Transpose::NoTrans => self.run(op_lhs, rhs, res, alpha),
            _ => {
                let kernel = TriangularMatVec::with_gemv(self.options().transposed(trans), self.gemv().clone());
                kernel.run(op_lhs, rhs, res, alpha);
            }
        }
        Ok(())
    }

    /// BLAS-style `x := op(T(lhs)) * x` for a square `lhs`.
    pub fn apply_in_place<T>(
        &self,
        trans: Transpose,
        lhs: MatView<'_, T>,
        mut x: VecViewMut<'_, T>,
    ) -> Result<(), TrmvError>
    where
        T: ScalarProduct<T, Output = T> + num_traits::One,
        G: Gemv<T, T> + Clone,
    {
        self.options().validate()?;
        if lhs.nrows() != lhs.ncols() {
            return Err(TrmvError::NotSquare { rows: lhs.nrows(), cols: lhs.ncols() });
        }
        if x.len() != lhs.nrows() {
            return Err(TrmvError::DimensionMismatch(format!(
                "A is {}x{} but x has {} entries",
                lhs.nrows(),
                lhs.ncols(),
                x.len()
            )));
        }
        let scratch = x.to_vec();
        x.fill(T::zero());
        self.apply(trans, lhs, VecView::contiguous(&scratch), x, T::one())
    }
}
