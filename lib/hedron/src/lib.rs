//! Triangle mesh data, plus (de)serialization to and from storage formats.

#[cfg(feature = "deserialize")]
pub mod de;

#[cfg(feature = "serialize")]
pub mod ser;

mod data;
pub use data::*;
