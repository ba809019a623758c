//! API options for the triangular kernels.
//!
//! `TrmvOptions` carries everything that selects a specialisation of the
//! kernel: the triangle and diagonal convention, per-operand conjugation and
//! the cache-blocking panel width.

use crate::config::mode::{Transpose, TriMode};
use crate::error::TrmvError;

/// Default panel width used to block the triangular region.
pub const DEFAULT_PANEL_WIDTH: usize = 16;

/// Triangular product options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrmvOptions {
    /// Triangle and diagonal convention
    pub mode: TriMode,

    /// Conjugate the matrix entries before multiplying
    pub conj_lhs: bool,

    /// Conjugate the vector entries before multiplying
    pub conj_rhs: bool,

    /// Number of diagonal entries handled per panel
    pub panel_width: usize,
}

impl Default for TrmvOptions {
    fn default() -> Self {
        Self {
            mode: TriMode::LOWER,
            conj_lhs: false,
            conj_rhs: false,
            panel_width: DEFAULT_PANEL_WIDTH,
        }
    }
}

impl TrmvOptions {
    pub fn new(mode: TriMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn with_conj_lhs(mut self, conj: bool) -> Self {
        self.conj_lhs = conj;
        self
    }

    pub fn with_conj_rhs(mut self, conj: bool) -> Self {
        self.conj_rhs = conj;
        self
    }

    pub fn with_panel_width(mut self, panel_width: usize) -> Self {
        self.panel_width = panel_width;
        self
    }

    pub fn validate(&self) -> Result<(), TrmvError> {
        self.mode.validate()?;
        if self.panel_width == 0 {
            return Err(TrmvError::ZeroPanelWidth);
        }
        Ok(())
    }

    /// Options for running on the view `A^T` when the caller asked for
    /// `op(A)`.
    pub fn transposed(&self, trans: Transpose) -> Self {
        match trans {
            Transpose::NoTrans => *self,
            Transpose::Trans => Self { mode: self.mode.transposed(), ..*self },
            Transpose::ConjTrans => Self {
                mode: self.mode.transposed(),
                conj_lhs: !self.conj_lhs,
                ..*self
            },
        }
    }
}
