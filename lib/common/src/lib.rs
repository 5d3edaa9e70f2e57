//! Items shared between `sixfold` and its satellite crates.

pub mod macros;

/// Trait for floating-point types, so that other things can be generic over {f32, f64} without
/// having to use [weird macros](crate::item_with).
///
/// # Safety
///
/// * This is only intended to be implemented on floating-point types.
#[allow(unsafe_code)]
pub unsafe trait Float:
    num_traits::Float
    + nalgebra::Scalar
    + nalgebra::SimdPartialOrd
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::ops::MulAssign
    + std::ops::DivAssign
    + std::fmt::Display
    + Default
    + Copy
    + Send
    + Sync
{
    const ZERO: Self;
    const HALF: Self;
    const ONE: Self;
    const TWO: Self;

    const MIN: Self;
    const MAX: Self;

    /// Lossy conversion from a grid coordinate component.
    fn from_u32(v: u32) -> Self;

    /// Lossy conversion from an `f32`, as used by mesh file formats.
    fn from_f32(v: f32) -> Self;

    /// Lossy conversion to an `f32`.
    fn to_f32(self) -> f32;
}

// this macro lets us impl Float for both f32 and f64 without having to copy/paste,
// but it feels very goofy
item_with! {Real: f32, f64 => unsafe impl Float for Real {
    #![allow(unsafe_code)]
    const ZERO: Self = 0.0;
    const HALF: Self = 0.5;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;

    const MIN: Self = Self::MIN;
    const MAX: Self = Self::MAX;

    #[inline]
    fn from_u32(v: u32) -> Self {
        v as Self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v as Self
    }

    #[inline]
    #[allow(clippy::unnecessary_cast)]
    fn to_f32(self) -> f32 {
        self as f32
    }
}}
