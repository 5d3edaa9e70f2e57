//! # See Also
//!
//! * [`TriMesh`]

mod color;
mod mesh;

pub use color::*;
pub use mesh::*;
