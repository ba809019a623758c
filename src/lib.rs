//! trimv: panel-blocked triangular matrix-vector products
//!
//! This crate provides the TRMV kernel `res += alpha * op(T(A)) * op(x)` over strided
//! dense views, where `T(A)` is the lower or upper triangle of `A` with an optional
//! unit or zero diagonal. Column-major and row-major storage, per-operand conjugation,
//! mixed real/complex scalars and rectangular matrices are supported. Dense
//! sub-products go through a pluggable GEMV backend (loops or faer).

pub mod config;
pub mod core;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use self::core::*;
pub use error::*;
pub use kernel::*;
pub use matrix::*;
pub use utils::*;
