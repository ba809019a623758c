//! Core scalar traits, the GEMV seam and faer adapters.

pub mod traits;
pub mod wrappers;

pub use traits::{Conjugate, Gemv, Product, Scalar, ScalarProduct};
pub use wrappers::TriangularProduct;
