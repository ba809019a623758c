//! Kernel configuration: triangular modes, operand ops and options.

pub mod mode;
pub mod options;

pub use mode::{Transpose, TriMode};
pub use options::{TrmvOptions, DEFAULT_PANEL_WIDTH};
