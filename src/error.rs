use hedron::MeshError;
use nalgebra::Point3;
use sixfold_common::Float;

use crate::Axis;

/// Errors related to voxelization.
#[derive(Debug, thiserror::Error)]
pub enum Error<Real: Float> {
    /// The mesh has no vertices, or they don't span any distance.
    #[error("cannot compute grid mapping for degenerate mesh bounds (global min {min}, global max {max}): at least two distinct vertices are required")]
    DegenerateMesh { min: Real, max: Real },
    #[error("grid resolution must be at least 1")]
    InvalidResolution,
    #[error("vertex {position:?} maps outside of the grid along {axis:?}: (0..{resolution}) ∌ {value}")]
    OutOfRangeGridCoordinate {
        position: Point3<Real>,
        axis: Axis,
        value: i64,
        resolution: u32,
    },
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
