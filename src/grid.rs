//! Mapping from mesh space into the voxel grid.

use nalgebra::Point3;
use sixfold_common::Float;

use crate::{error::Error, spatial::Aabb};

/// The axis of a grid or world coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// The coordinates of a cell within the voxel grid.
pub type GridPoint = Point3<u32>;

/// How positions are normalized before being scaled to the grid resolution.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// Divide every axis by the mesh's [global span](Aabb::global_span), without subtracting any
    /// origin.
    ///
    /// Non-cubic meshes are squashed into the cubic grid, and meshes not resting on the origin
    /// are shifted within (or out of) it.
    #[default]
    GlobalSpan,
    /// Map each axis' own `min..max` extent onto the full grid.
    ///
    /// Axes with no extent map to cell 0.
    PerAxis,
}

/// What happens to positions whose cell lies outside of `0..resolution`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RangePolicy {
    /// Clamp each component into `0..resolution`, so that the maximum bound lands in the last
    /// cell rather than one past it.
    #[default]
    Clamp,
    /// Fail with [`OutOfRangeGridCoordinate`](Error::OutOfRangeGridCoordinate).
    Reject,
    /// Keep components past the end of the grid unchanged. Negative components still saturate
    /// to 0, since grid coordinates are unsigned.
    PassThrough,
}

/// Compute the raw (possibly out-of-range) cell of `p` along each axis:
/// `floor(p / span * resolution)`.
#[inline]
pub fn project<Real: Float>(p: &Point3<Real>, span: Real, resolution: u32) -> [i64; 3] {
    let res = Real::from_u32(resolution);
    let cell = |v: Real| saturate_i64((v / span * res).floor());
    [cell(p.x), cell(p.y), cell(p.z)]
}

#[inline]
fn saturate_i64<Real: Float>(v: Real) -> i64 {
    // NaN ends up in cell 0, like every other float-to-int cast
    v.to_i64().unwrap_or(if v > Real::ZERO { i64::MAX } else { 0 })
}

/// A transformation from mesh space to grid space, derived from a mesh's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapper<Real: Float> {
    bounds: Aabb<Real>,
    span: Real,
    resolution: u32,
    normalization: Normalization,
    range_policy: RangePolicy,
}

impl<Real: Float> GridMapper<Real> {
    /// Construct a mapper onto a grid of `resolution³` cells.
    ///
    /// # Errors
    ///
    /// * [`InvalidResolution`](Error::InvalidResolution) if `resolution == 0`.
    /// * [`DegenerateMesh`](Error::DegenerateMesh) if `bounds` has no positive
    ///   [span](Aabb::global_span).
    pub fn new(bounds: Aabb<Real>, resolution: u32) -> Result<Self, Error<Real>> {
        if resolution == 0 {
            return Err(Error::InvalidResolution);
        }
        Ok(Self {
            span: bounds.global_span()?,
            bounds,
            resolution,
            normalization: Normalization::default(),
            range_policy: RangePolicy::default(),
        })
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_range_policy(mut self, range_policy: RangePolicy) -> Self {
        self.range_policy = range_policy;
        self
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The global span of the mesh bounds; also the edge length of the whole grid in mesh units.
    #[inline]
    pub fn span(&self) -> Real {
        self.span
    }

    /// The raw cell of `p`, before any [RangePolicy] is applied.
    pub fn project(&self, p: &Point3<Real>) -> [i64; 3] {
        match self.normalization {
            Normalization::GlobalSpan => project(p, self.span, self.resolution),
            Normalization::PerAxis => {
                let res = Real::from_u32(self.resolution);
                let ext = self.bounds.extents();
                let cell = |v: Real, min: Real, len: Real| match len > Real::ZERO {
                    true => saturate_i64(((v - min) / len * res).floor()),
                    false => 0,
                };
                [
                    cell(p.x, self.bounds.mins.x, ext.x),
                    cell(p.y, self.bounds.mins.y, ext.y),
                    cell(p.z, self.bounds.mins.z, ext.z),
                ]
            }
        }
    }

    /// Map a mesh-space position to its grid cell.
    ///
    /// # Errors
    ///
    /// * [`OutOfRangeGridCoordinate`](Error::OutOfRangeGridCoordinate) if the cell is outside of
    ///   the grid and the mapper uses [RangePolicy::Reject].
    pub fn map(&self, p: &Point3<Real>) -> Result<GridPoint, Error<Real>> {
        let raw = self.project(p);
        let last = i64::from(self.resolution) - 1;
        let mut res = [0u32; 3];
        for ((out, value), axis) in res.iter_mut().zip(raw).zip(Axis::ALL) {
            let in_range = (0..=last).contains(&value);
            *out = match self.range_policy {
                RangePolicy::Clamp => {
                    #[cfg(feature = "tracing")]
                    {
                        if !in_range {
                            tracing::warn!(position = ?p, ?axis, value, "clamping vertex into grid");
                        }
                    }
                    value.clamp(0, last) as u32
                }
                RangePolicy::Reject if !in_range => {
                    return Err(Error::OutOfRangeGridCoordinate {
                        position: *p,
                        axis,
                        value,
                        resolution: self.resolution,
                    })
                }
                RangePolicy::Reject => value as u32,
                RangePolicy::PassThrough => value.clamp(0, i64::from(u32::MAX)) as u32,
            };
        }
        Ok(GridPoint::from(res))
    }
}
