//! Triangular matrix times a block of right-hand-side columns.
//!
//! Each column of `RES += alpha * T(A) * X` is an independent kernel call
//! writing a disjoint column of `RES`. With the `rayon` feature the columns
//! are processed in parallel.

use crate::core::traits::{Gemv, Product, Scalar, ScalarProduct};
use crate::error::TrmvError;
use crate::kernel::trmv::TriangularMatVec;
use crate::matrix::view::{MatView, VecView, VecViewMut};

impl<G> TriangularMatVec<G> {
    /// `RES += alpha * T(lhs) * X` for `ncols` column-major columns.
    ///
    /// Column `j` of `X` starts at `rhs[j * ld_rhs]` and has `lhs.ncols()`
    /// entries; column `j` of `RES` starts at `res[j * ld_res]` and has
    /// `lhs.nrows()` entries.
    #[allow(clippy::too_many_arguments)]
    pub fn run_columns<L, R>(
        &self,
        lhs: MatView<'_, L>,
        rhs: &[R],
        ld_rhs: usize,
        res: &mut [Product<L, R>],
        ld_res: usize,
        ncols: usize,
        alpha: Product<L, R>,
    ) -> Result<(), TrmvError>
    where
        L: ScalarProduct<R>,
        R: Scalar,
        G: Gemv<L, R> + Sync,
    {
        self.options().validate()?;
        let (m, n) = (lhs.nrows(), lhs.ncols());
        if ncols > 1 && ld_rhs < n {
            return Err(TrmvError::StrideTooSmall { stride: ld_rhs, extent: n });
        }
        if ncols > 1 && ld_res < m {
            return Err(TrmvError::StrideTooSmall { stride: ld_res, extent: m });
        }
        if m == 0 || ncols == 0 {
            return Ok(());
        }
        let rhs_required = if n == 0 { 0 } else { (ncols - 1) * ld_rhs + n };
        if rhs.len() < rhs_required {
            return Err(TrmvError::BufferTooShort { required: rhs_required, actual: rhs.len() });
        }
        let res_required = (ncols - 1) * ld_res + m;
        if res.len() < res_required {
            return Err(TrmvError::BufferTooShort { required: res_required, actual: res.len() });
        }
        // a single column may come with a zero leading dimension
        let ld_res = ld_res.max(m);

        let column = |j: usize, out: &mut [Product<L, R>]| {
            let x = if n == 0 {
                VecView::contiguous(&rhs[..0])
            } else {
                VecView::contiguous(&rhs[j * ld_rhs..j * ld_rhs + n])
            };
            self.run(lhs, x, VecViewMut::contiguous(&mut out[..m]), alpha);
        };

        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            log::debug!("trmv batch: {} columns of {}x{} in parallel", ncols, m, n);
            res.par_chunks_mut(ld_res)
                .take(ncols)
                .enumerate()
                .for_each(|(j, out)| column(j, out));
        }
        #[cfg(not(feature = "rayon"))]
        {
            log::debug!("trmv batch: {} columns of {}x{}", ncols, m, n);
            res.chunks_mut(ld_res)
                .take(ncols)
                .enumerate()
                .for_each(|(j, out)| column(j, out));
        }
        Ok(())
    }
}
