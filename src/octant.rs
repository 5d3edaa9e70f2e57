use nalgebra::Vector3;
use sixfold_common::Float;

/// A way to refer to the octants of a cube, or equivalently, to its corners.
///
/// # Diagram
/// `IJK>A`, where `IJK` are the octant coords (`1` on the positive side of an axis), and `A` is
/// the octant's index.
/// <pre>
/// Lower           Upper
/// -------------   -------------     2 - 6     J
/// |000>0|100>4|   |010>2|110>6|   3 - 7 |     |
/// |-----|-----|   |-----|-----|   |   | 4     ___ I
/// |001>1|101>5|   |011>3|111>7|   1 - 5      /
/// -------------   -------------             K
/// </pre>
#[repr(transparent)]
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Octant(pub u8);

impl Octant {
    /// Whether self lies on the positive side of the `i` axis.
    #[inline]
    pub fn i(self) -> bool {
        self.0 & 0b100 != 0
    }
    /// Whether self lies on the positive side of the `j` axis.
    #[inline]
    pub fn j(self) -> bool {
        self.0 & 0b010 != 0
    }
    /// Whether self lies on the positive side of the `k` axis.
    #[inline]
    pub fn k(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// A vector of `±½` per axis, pointing from the center of a unit cube to this corner.
    pub fn half_offset<Real: Float>(self) -> Vector3<Real> {
        let h = |pos: bool| if pos { Real::HALF } else { -Real::HALF };
        Vector3::new(h(self.i()), h(self.j()), h(self.k()))
    }
}
