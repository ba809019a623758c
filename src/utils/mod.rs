//! Utilities: the unblocked reference product.

pub mod reference;
pub use reference::trmv_reference;
