//! Unblocked triangular matrix-vector product, used as a test oracle.
//!
//! Walks every `(i, j)` of `A` and keeps the entries the mode selects. No
//! panels and no dense backend, so it shares no code path with the blocked
//! kernel.

use crate::config::options::TrmvOptions;
use crate::core::traits::{Product, Scalar, ScalarProduct};
use crate::matrix::view::{MatView, VecView, VecViewMut};
use num_traits::Zero;

/// `res += alpha * T(lhs) * rhs`, one entry at a time.
pub fn trmv_reference<L, R>(
    opts: &TrmvOptions,
    lhs: MatView<'_, L>,
    rhs: VecView<'_, R>,
    mut res: VecViewMut<'_, Product<L, R>>,
    alpha: Product<L, R>,
) where
    L: ScalarProduct<R>,
    R: Scalar,
{
    let mode = opts.mode;
    for i in 0..lhs.nrows() {
        let mut acc = <Product<L, R> as Zero>::zero();
        for j in 0..lhs.ncols() {
            let xj = rhs.get(j).conj_if(opts.conj_rhs);
            let in_triangle = if mode.is_lower() { j <= i } else { j >= i };
            if !in_triangle {
                continue;
            }
            if i == j {
                if mode.has_unit_diag() {
                    res.add(i, alpha * xj);
                }
                if mode.excludes_diagonal() {
                    continue;
                }
            }
            acc += lhs.get(i, j).conj_if(opts.conj_lhs).mul_rhs(xj);
        }
        res.add(i, alpha * acc);
    }
}
