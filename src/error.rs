use thiserror::Error;

// Unified error type for trimv. Only the checked entry points return it;
// the hot-path kernel relies on debug assertions.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrmvError {
    #[error("buffer too short: view needs {required} elements, slice has {actual}")]
    BufferTooShort { required: usize, actual: usize },
    #[error("stride {stride} is smaller than the inner extent {extent}")]
    StrideTooSmall { stride: usize, extent: usize },
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid triangular mode: {0}")]
    InvalidMode(&'static str),
    #[error("panel width must be at least 1")]
    ZeroPanelWidth,
    #[error("in-place product needs a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}
