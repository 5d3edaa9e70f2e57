//! Reduction of each cell's [candidates](CandidateMap) into a single voxel.

use hedron::Rgba;
use indexmap::IndexMap;
use nalgebra::{Vector2, Vector3};
use sixfold_common::Float;

use crate::{CandidateMap, GridMapper, GridPoint, VoxelSample};

/// Define how the samples recorded in a single cell are merged into that cell's voxel.
pub trait SampleReduce<Real: Float> {
    /// Merge a cell's samples, given in the order they were recorded. Returns `None` only if
    /// `samples` is empty.
    fn reduce(&self, samples: &[VoxelSample<Real>]) -> Option<VoxelSample<Real>>;
}

impl<Real: Float, T: SampleReduce<Real> + ?Sized> SampleReduce<Real> for &T {
    #[inline]
    fn reduce(&self, samples: &[VoxelSample<Real>]) -> Option<VoxelSample<Real>> {
        (**self).reduce(samples)
    }
}

impl<Real: Float, T: SampleReduce<Real> + ?Sized> SampleReduce<Real> for Box<T> {
    #[inline]
    fn reduce(&self, samples: &[VoxelSample<Real>]) -> Option<VoxelSample<Real>> {
        (**self).reduce(samples)
    }
}

/// Keep the first sample recorded in each cell and discard the rest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FirstSample;

impl<Real: Float> SampleReduce<Real> for FirstSample {
    #[inline]
    fn reduce(&self, samples: &[VoxelSample<Real>]) -> Option<VoxelSample<Real>> {
        samples.first().cloned()
    }
}

/// Average every sample recorded in a cell.
///
/// * Colors are averaged per channel.
/// * Normals are summed over the samples that have one, then normalized. If they cancel out, the
///   voxel has no normal.
/// * UVs are averaged over the samples that have one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MeanSample;

impl<Real: Float> SampleReduce<Real> for MeanSample {
    fn reduce(&self, samples: &[VoxelSample<Real>]) -> Option<VoxelSample<Real>> {
        if samples.is_empty() {
            return None;
        }

        let mut color = [0.0f32; 4];
        let mut normal: Option<Vector3<Real>> = None;
        let (mut uv, mut uvs) = (Vector2::<Real>::zeros(), 0u32);
        for s in samples {
            for (acc, c) in color.iter_mut().zip(s.color.to_array()) {
                *acc += c;
            }
            if let Some(n) = &s.normal {
                *normal.get_or_insert_with(Vector3::zeros) += n;
            }
            if let Some(t) = &s.uv {
                uv += t.coords;
                uvs += 1;
            }
        }
        let count = samples.len() as f32;
        let [r, g, b, a] = color.map(|c| c / count);

        Some(VoxelSample {
            color: Rgba::new(r, g, b, a),
            normal: normal.and_then(|n| {
                let len = (n.x * n.x + n.y * n.y + n.z * n.z).sqrt();
                (len > Real::ZERO).then(|| n / len)
            }),
            uv: (uvs > 0).then(|| (uv / Real::from_u32(uvs)).into()),
        })
    }
}

/// The result of voxelizing a mesh: at most one resolved [VoxelSample] per cell of a
/// `resolution³` grid, in the order the cells were first touched.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelizedMesh<Real: Float> {
    resolution: u32,
    scale: Real,
    voxels: IndexMap<GridPoint, VoxelSample<Real>>,
}

impl<Real: Float> VoxelizedMesh<Real> {
    /// Reduce every cell in `candidates` to a single voxel, preserving cell order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(cells = candidates.len(), samples = candidates.sample_count()))
    )]
    pub fn resolve<R: SampleReduce<Real> + ?Sized>(
        candidates: CandidateMap<Real>,
        mapper: &GridMapper<Real>,
        reducer: &R,
    ) -> Self {
        let voxels = candidates
            .into_iter()
            .filter_map(|(cell, samples)| reducer.reduce(&samples).map(|v| (cell, v)))
            .collect();
        Self {
            resolution: mapper.resolution(),
            scale: mapper.span(),
            voxels,
        }
    }

    /// The number of cells along each axis of the grid.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The edge length of the whole grid, in mesh units.
    #[inline]
    pub fn scale(&self) -> Real {
        self.scale
    }

    /// The edge length of a single cell, in mesh units.
    #[inline]
    pub fn cell_size(&self) -> Real {
        self.scale / Real::from_u32(self.resolution)
    }

    /// Each occupied cell and its attributes.
    pub fn voxels(&self) -> impl ExactSizeIterator<Item = (&GridPoint, &VoxelSample<Real>)> + '_ {
        self.voxels.iter()
    }

    /// The occupied cells.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &GridPoint> + '_ {
        self.voxels.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// The attributes of the voxel occupying `cell`, if any.
    #[inline]
    pub fn get(&self, cell: &GridPoint) -> Option<&VoxelSample<Real>> {
        self.voxels.get(cell)
    }
}
