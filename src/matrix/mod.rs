//! Matrix module: strided dense views.

pub mod view;
pub use view::{MatView, StorageOrder, VecView, VecViewMut};
