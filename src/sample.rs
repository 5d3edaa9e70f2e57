use hedron::Rgba;
use nalgebra::{Point2, Vector3};
use sixfold_common::Float;

/// The attributes one mesh vertex contributes to the cell it lands in.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelSample<Real: Float> {
    pub color: Rgba,
    pub normal: Option<Vector3<Real>>,
    pub uv: Option<Point2<Real>>,
}

impl<Real: Float> Default for VoxelSample<Real> {
    /// Opaque white, with no normal or UV.
    fn default() -> Self {
        Self::from_color(Rgba::WHITE)
    }
}

impl<Real: Float> VoxelSample<Real> {
    #[inline]
    pub fn from_color(color: Rgba) -> Self {
        Self {
            color,
            normal: None,
            uv: None,
        }
    }
}
