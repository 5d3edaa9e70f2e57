//! Bounding volumes over mesh space.

mod bounding_box;
pub use bounding_box::*;
