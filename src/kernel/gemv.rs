//! Dense matrix-vector backends used for the rectangular parts of a
//! triangular product.
//!
//! - [`NaiveGemv`]: plain strided loops, generic over mixed scalar types and
//!   both storage orders.
//! - [`FaerGemv`]: same-type scalars, forwarded to
//!   `faer::linalg::matmul::matmul_with_conj`.

use crate::core::traits::{Gemv, Product, Scalar, ScalarProduct};
use crate::matrix::view::{MatView, StorageOrder, VecView, VecViewMut};
use faer::linalg::matmul::matmul_with_conj;
use faer::mat::{MatMut, MatRef};
use faer::traits::ComplexField;
use faer::{Accum, Conj, Par};
use num_traits::Zero;

/// Loop-based GEMV over strided views.
#[derive(Copy, Clone, Debug, Default)]
pub struct NaiveGemv;

impl<L, R> Gemv<L, R> for NaiveGemv
where
    L: ScalarProduct<R>,
    R: Scalar,
{
    fn gemv(
        &self,
        lhs: MatView<'_, L>,
        conj_lhs: bool,
        rhs: VecView<'_, R>,
        conj_rhs: bool,
        mut res: VecViewMut<'_, Product<L, R>>,
        alpha: Product<L, R>,
    ) {
        debug_assert_eq!(rhs.len(), lhs.ncols());
        debug_assert_eq!(res.len(), lhs.nrows());
        let (m, n) = (lhs.nrows(), lhs.ncols());
        match lhs.order() {
            // axpy over each column
            StorageOrder::ColMajor => {
                for j in 0..n {
                    let xj = alpha * rhs.get(j).conj_if(conj_rhs);
                    for i in 0..m {
                        res.add(i, xj * lhs.get(i, j).conj_if(conj_lhs));
                    }
                }
            }
            // dot per row
            StorageOrder::RowMajor => {
                for i in 0..m {
                    let mut acc = <Product<L, R> as Zero>::zero();
                    for j in 0..n {
                        acc += lhs.get(i, j).conj_if(conj_lhs).mul_rhs(rhs.get(j).conj_if(conj_rhs));
                    }
                    res.add(i, alpha * acc);
                }
            }
        }
    }
}

/// GEMV forwarded to faer's matrix multiply.
///
/// Only available when matrix, vector and result share one faer scalar
/// type.
#[derive(Copy, Clone, Debug, Default)]
pub struct FaerGemv;

impl<T> Gemv<T, T> for FaerGemv
where
    T: ScalarProduct<T, Output = T> + ComplexField,
{
    fn gemv(
        &self,
        lhs: MatView<'_, T>,
        conj_lhs: bool,
        rhs: VecView<'_, T>,
        conj_rhs: bool,
        mut res: VecViewMut<'_, T>,
        alpha: T,
    ) {
        let (m, n) = (lhs.nrows(), lhs.ncols());
        assert_eq!(rhs.len(), n, "rhs length must match lhs columns");
        assert_eq!(res.len(), m, "res length must match lhs rows");
        if m == 0 || n == 0 {
            return;
        }
        // The raw parts below must stay inside the borrowed slices.
        assert!(lhs.required_len() <= lhs.as_slice().len());
        assert!((n - 1) * rhs.incr() < rhs.as_slice().len());
        let (res_incr, res_len) = (res.incr(), res.len());
        let res_data = res.as_mut_slice();
        assert!((res_len - 1) * res_incr < res_data.len());

        let (rs, cs) = lhs.strides();
        let cj_a = if conj_lhs { Conj::Yes } else { Conj::No };
        let cj_b = if conj_rhs { Conj::Yes } else { Conj::No };
        unsafe {
            let a_mat: MatRef<'_, T> =
                MatRef::from_raw_parts(lhs.as_slice().as_ptr(), m, n, rs as isize, cs as isize);
            let b_mat: MatRef<'_, T> = MatRef::from_raw_parts(
                rhs.as_slice().as_ptr(),
                n,
                1,
                rhs.incr() as isize,
                (n * rhs.incr()) as isize,
            );
            let c_mat: MatMut<'_, T> = MatMut::from_raw_parts_mut(
                res_data.as_mut_ptr(),
                m,
                1,
                res_incr as isize,
                (m * res_incr) as isize,
            );
            matmul_with_conj(c_mat, Accum::Add, a_mat, cj_a, b_mat, cj_b, alpha, Par::Seq);
        }
    }
}
