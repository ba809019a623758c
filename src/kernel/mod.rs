//! Kernels: the blocked triangular product, its dense backends and the checked
//! entry points built on it.

pub mod batch;
pub mod gemv;
pub mod ops;
pub mod trmv;

pub use gemv::{FaerGemv, NaiveGemv};
pub use trmv::TriangularMatVec;
