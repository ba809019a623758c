//! Panel-blocked triangular matrix-vector product.
//!
//! Computes `res += alpha * conj?(T(A)) * conj?(x)` where `T(A)` keeps the
//! lower or upper triangle of `A`, optionally with an implicit unit or zero
//! diagonal. The square region `min(rows, cols)` is cut into panels of
//! `panel_width` diagonal entries. Inside a panel the triangle is walked one
//! column (column-major) or one row (row-major) at a time; the dense block
//! that the panel shares with the rest of the triangle, and any rectangular
//! excess of a non-square `A`, go through the [`Gemv`] backend in single
//! calls.

use std::fmt;

use crate::config::mode::TriMode;
use crate::config::options::TrmvOptions;
use crate::core::traits::{Gemv, Product, Scalar, ScalarProduct};
use crate::error::TrmvError;
use crate::kernel::gemv::NaiveGemv;
use crate::matrix::view::{MatView, StorageOrder, VecView, VecViewMut};
use num_traits::Zero;

/// Triangular matrix-vector kernel with a pluggable dense backend.
#[derive(Clone, Debug)]
pub struct TriangularMatVec<G = NaiveGemv> {
    opts: TrmvOptions,
    gemv: G,
}

impl TriangularMatVec<NaiveGemv> {
    pub fn new(opts: TrmvOptions) -> Self {
        Self { opts, gemv: NaiveGemv }
    }
}

impl<G> TriangularMatVec<G> {
    /// Use `gemv` for the rectangular sub-products.
    pub fn with_gemv(opts: TrmvOptions, gemv: G) -> Self {
        Self { opts, gemv }
    }

    pub fn options(&self) -> &TrmvOptions {
        &self.opts
    }

    pub fn set_options(&mut self, opts: TrmvOptions) {
        self.opts = opts;
    }

    pub fn mode(&self) -> TriMode {
        self.opts.mode
    }

    pub fn set_mode(&mut self, mode: TriMode) {
        self.opts.mode = mode;
    }

    pub fn panel_width(&self) -> usize {
        self.opts.panel_width
    }

    /// Rejects a width of 0.
    pub fn set_panel_width(&mut self, panel_width: usize) -> Result<(), TrmvError> {
        if panel_width == 0 {
            return Err(TrmvError::ZeroPanelWidth);
        }
        self.opts.panel_width = panel_width;
        Ok(())
    }

    pub fn gemv(&self) -> &G {
        &self.gemv
    }

    /// `res += alpha * T(lhs) * rhs`.
    ///
    /// `rhs.len()` must equal `lhs.ncols()` and `res.len()` must equal
    /// `lhs.nrows()`. These are caller obligations, checked only in debug
    /// builds. Empty operands make this a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the options carry a panel width of 0. Use
    /// [`run_strided`](Self::run_strided) or [`apply`](Self::apply) to get
    /// [`TrmvError::ZeroPanelWidth`] instead.
    pub fn run<L, R>(
        &self,
        lhs: MatView<'_, L>,
        rhs: VecView<'_, R>,
        res: VecViewMut<'_, Product<L, R>>,
        alpha: Product<L, R>,
    ) where
        L: ScalarProduct<R>,
        R: Scalar,
        G: Gemv<L, R>,
    {
        debug_assert!(self.opts.validate().is_ok(), "invalid options {:?}", self.opts);
        debug_assert_eq!(rhs.len(), lhs.ncols(), "rhs length must equal lhs columns");
        debug_assert_eq!(res.len(), lhs.nrows(), "res length must equal lhs rows");
        log::trace!(
            "trmv {}x{} mode={:?} order={:?} panel={} conj=({}, {})",
            lhs.nrows(),
            lhs.ncols(),
            self.opts.mode,
            lhs.order(),
            self.opts.panel_width,
            self.opts.conj_lhs,
            self.opts.conj_rhs
        );
        match lhs.order() {
            StorageOrder::ColMajor => self.run_col_major(lhs, rhs, res, alpha),
            StorageOrder::RowMajor => self.run_row_major(lhs, rhs, res, alpha),
        }
    }

    /// Slice-and-stride form of [`run`](Self::run).
    ///
    /// Builds checked views over the raw buffers first, so a buffer that is
    /// too short or a stride that aliases elements is reported instead of
    /// panicking.
    #[allow(clippy::too_many_arguments)]
    pub fn run_strided<L, R>(
        &self,
        order: StorageOrder,
        rows: usize,
        cols: usize,
        lhs: &[L],
        lhs_stride: usize,
        rhs: &[R],
        rhs_incr: usize,
        res: &mut [Product<L, R>],
        res_incr: usize,
        alpha: Product<L, R>,
    ) -> Result<(), TrmvError>
    where
        L: ScalarProduct<R>,
        R: Scalar,
        G: Gemv<L, R>,
    {
        self.opts.validate()?;
        let lhs = MatView::new(lhs, rows, cols, lhs_stride, order)?;
        let rhs = VecView::new(rhs, cols, rhs_incr)?;
        let res = VecViewMut::new(res, rows, res_incr)?;
        self.run(lhs, rhs, res, alpha);
        Ok(())
    }

    fn run_col_major<L, R>(
        &self,
        lhs: MatView<'_, L>,
        rhs: VecView<'_, R>,
        mut res: VecViewMut<'_, Product<L, R>>,
        alpha: Product<L, R>,
    ) where
        L: ScalarProduct<R>,
        R: Scalar,
        G: Gemv<L, R>,
    {
        let TrmvOptions { mode, conj_lhs, conj_rhs, panel_width } = self.opts;
        let is_lower = mode.is_lower();
        let skip_diag = mode.excludes_diagonal();
        let unit_diag = mode.has_unit_diag();

        let size = lhs.nrows().min(lhs.ncols());
        let rows = if is_lower { lhs.nrows() } else { size };
        let cols = if is_lower { size } else { lhs.ncols() };

        for pi in (0..size).step_by(panel_width) {
            let panel = panel_width.min(size - pi);
            for k in 0..panel {
                let i = pi + k;
                let xi = alpha * rhs.get(i).conj_if(conj_rhs);
                // Column i of the panel: rows [s, s + r). The diagonal is the
                // first row for lower and the last for upper.
                let (s, mut r) = if is_lower {
                    (if skip_diag { i + 1 } else { i }, panel - k)
                } else {
                    (pi, k + 1)
                };
                if skip_diag {
                    r -= 1;
                }
                for row in s..s + r {
                    res.add(row, xi * lhs.get(row, i).conj_if(conj_lhs));
                }
                if unit_diag {
                    res.add(i, xi);
                }
            }
            // Rows below (lower) or above (upper) the panel.
            let r = if is_lower { rows - pi - panel } else { pi };
            if r > 0 {
                let s = if is_lower { pi + panel } else { 0 };
                self.gemv.gemv(
                    lhs.submatrix(s, pi, r, panel),
                    conj_lhs,
                    rhs.segment(pi, panel),
                    conj_rhs,
                    res.segment_mut(s, r),
                    alpha,
                );
            }
        }
        if !is_lower && cols > size {
            self.gemv.gemv(
                lhs.submatrix(0, size, rows, cols - size),
                conj_lhs,
                rhs.segment(size, cols - size),
                conj_rhs,
                res.segment_mut(0, rows),
                alpha,
            );
        }
    }

    fn run_row_major<L, R>(
        &self,
        lhs: MatView<'_, L>,
        rhs: VecView<'_, R>,
        mut res: VecViewMut<'_, Product<L, R>>,
        alpha: Product<L, R>,
    ) where
        L: ScalarProduct<R>,
        R: Scalar,
        G: Gemv<L, R>,
    {
        let TrmvOptions { mode, conj_lhs, conj_rhs, panel_width } = self.opts;
        let is_lower = mode.is_lower();
        let skip_diag = mode.excludes_diagonal();
        let unit_diag = mode.has_unit_diag();

        let size = lhs.nrows().min(lhs.ncols());
        let rows = if is_lower { lhs.nrows() } else { size };
        let cols = if is_lower { size } else { lhs.ncols() };

        for pi in (0..size).step_by(panel_width) {
            let panel = panel_width.min(size - pi);
            for k in 0..panel {
                let i = pi + k;
                // Row i of the panel: columns [s, s + r). The diagonal is the
                // last column for lower and the first for upper.
                let (s, mut r) = if is_lower {
                    (pi, k + 1)
                } else {
                    (if skip_diag { i + 1 } else { i }, panel - k)
                };
                if skip_diag {
                    r -= 1;
                }
                if r > 0 {
                    let mut acc = <Product<L, R> as Zero>::zero();
                    for col in s..s + r {
                        acc += lhs.get(i, col).conj_if(conj_lhs).mul_rhs(rhs.get(col).conj_if(conj_rhs));
                    }
                    res.add(i, alpha * acc);
                }
                if unit_diag {
                    res.add(i, alpha * rhs.get(i).conj_if(conj_rhs));
                }
            }
            // Columns left of (lower) or right of (upper) the panel.
            let r = if is_lower { pi } else { cols - pi - panel };
            if r > 0 {
                let s = if is_lower { 0 } else { pi + panel };
                self.gemv.gemv(
                    lhs.submatrix(pi, s, panel, r),
                    conj_lhs,
                    rhs.segment(s, r),
                    conj_rhs,
                    res.segment_mut(pi, panel),
                    alpha,
                );
            }
        }
        if is_lower && rows > size {
            self.gemv.gemv(
                lhs.submatrix(size, 0, rows - size, cols),
                conj_lhs,
                rhs.segment(0, cols),
                conj_rhs,
                res.segment_mut(size, rows - size),
                alpha,
            );
        }
    }
}

impl Default for TriangularMatVec<NaiveGemv> {
    fn default() -> Self {
        Self::new(TrmvOptions::default())
    }
}

impl<G> fmt::Display for TriangularMatVec<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRMV(mode={:?}, conj_lhs={}, conj_rhs={}, panel_width={})",
            self.opts.mode, self.opts.conj_lhs, self.opts.conj_rhs, self.opts.panel_width
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_ones(n: usize) -> Vec<f64> {
        // column-major, ones strictly below the diagonal, junk on and above it
        let mut a = vec![0.0; n * n];
        for j in 0..n {
            for i in 0..n {
                a[j * n + i] = if i > j { 1.0 } else { 99.0 };
            }
        }
        a
    }

    #[test]
    fn unit_lower_of_ones_counts_rows() {
        let n = 5;
        let a = lower_ones(n);
        let x = vec![1.0; n];
        let mut res = vec![0.0; n];
        let trmv = TriangularMatVec::new(TrmvOptions::new(TriMode::UNIT_LOWER));
        trmv.run(
            MatView::col_major(&a, n, n).unwrap(),
            VecView::contiguous(&x),
            VecViewMut::contiguous(&mut res),
            1.0,
        );
        assert_eq!(res, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn small_upper_by_hand() {
        // A = [[1, 2, 3],
        //      [x, 4, 5],
        //      [x, x, 6]]   (x never read)
        let a = [1.0, -7.0, -7.0, 2.0, 4.0, -7.0, 3.0, 5.0, 6.0];
        let x = [1.0, 2.0, 3.0];
        let mut res = vec![1.0, 1.0, 1.0];
        let trmv = TriangularMatVec::new(TrmvOptions::new(TriMode::UPPER).with_panel_width(2));
        trmv.run(
            MatView::col_major(&a, 3, 3).unwrap(),
            VecView::contiguous(&x),
            VecViewMut::contiguous(&mut res),
            2.0,
        );
        // A x = [14, 23, 18]
        assert_eq!(res, vec![29.0, 47.0, 37.0]);
    }

    #[test]
    fn row_major_matches_col_major() {
        // same logical lower matrix in both layouts
        let col = [1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 0.0, 6.0];
        let row = [1.0, 0.0, 0.0, 2.0, 4.0, 0.0, 3.0, 5.0, 6.0];
        let x = [1.0, -1.0, 2.0];
        let trmv = TriangularMatVec::new(TrmvOptions::new(TriMode::LOWER).with_panel_width(2));
        let mut r1 = vec![0.0; 3];
        let mut r2 = vec![0.0; 3];
        let xv = VecView::contiguous(&x);
        trmv.run(MatView::col_major(&col, 3, 3).unwrap(), xv, VecViewMut::contiguous(&mut r1), 1.0);
        trmv.run(MatView::row_major(&row, 3, 3).unwrap(), xv, VecViewMut::contiguous(&mut r2), 1.0);
        assert_eq!(r1, vec![1.0, -2.0, 10.0]);
        assert_eq!(r1, r2);
    }

    #[test]
    fn empty_input_is_noop() {
        let trmv = TriangularMatVec::default();
        let empty: [f64; 0] = [];
        let mut res: Vec<f64> = vec![];
        trmv.run(
            MatView::col_major(&empty, 0, 0).unwrap(),
            VecView::contiguous(&empty),
            VecViewMut::contiguous(&mut res),
            1.0,
        );
        // 3x0: nothing to add
        let mut res = vec![7.0; 3];
        trmv.run(
            MatView::col_major(&empty, 3, 0).unwrap(),
            VecView::contiguous(&empty),
            VecViewMut::contiguous(&mut res),
            1.0,
        );
        assert_eq!(res, vec![7.0; 3]);
    }

    #[test]
    fn run_strided_reports_short_buffers() {
        let trmv = TriangularMatVec::default();
        let a = [1.0; 8];
        let x = [1.0; 3];
        let mut res = vec![0.0; 3];
        let err = trmv
            .run_strided(StorageOrder::ColMajor, 3, 3, &a, 3, &x, 1, &mut res, 1, 1.0)
            .unwrap_err();
        assert_eq!(err, TrmvError::BufferTooShort { required: 9, actual: 8 });
    }

    #[test]
    fn set_panel_width_rejects_zero() {
        let mut trmv = TriangularMatVec::new(TrmvOptions::default().with_panel_width(4));
        assert_eq!(trmv.set_panel_width(0), Err(TrmvError::ZeroPanelWidth));
        assert_eq!(trmv.panel_width(), 4);
        trmv.set_panel_width(7).unwrap();
        assert_eq!(trmv.panel_width(), 7);
    }

    #[test]
    fn display_lists_parameters() {
        let trmv = TriangularMatVec::new(TrmvOptions::new(TriMode::STRICTLY_UPPER).with_panel_width(4));
        let s = format!("{}", trmv);
        assert!(s.contains("TRMV(mode="));
        assert!(s.contains("panel_width=4"));
    }
}
