use hedron::TriMesh;
use sixfold_common::Float;

use crate::{
    error::Error, spatial::Aabb, CandidateMap, CellAnchor, FirstSample, GridMapper,
    Normalization, RangePolicy, Rasterizer, SampleReduce, VertexRasterizer, VoxelizedMesh,
};

/// Settings for a [Voxelizer].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoxelizeConfig {
    /// Number of cells along each axis of the grid. Must be at least 1.
    pub resolution: u32,
    pub normalization: Normalization,
    pub range_policy: RangePolicy,
    /// Used by [Voxelizer::cube_mesh].
    pub anchor: CellAnchor,
}

impl Default for VoxelizeConfig {
    fn default() -> Self {
        Self::with_resolution(1)
    }
}

impl VoxelizeConfig {
    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            resolution,
            normalization: Normalization::default(),
            range_policy: RangePolicy::default(),
            anchor: CellAnchor::default(),
        }
    }
}

/// Turns meshes into [VoxelizedMeshes](VoxelizedMesh).
///
/// Each call to [Self::voxelize] runs one complete pass: bounds, mapping, rasterization, then
/// reduction. Nothing is kept between passes.
#[derive(Debug, Clone, Default)]
pub struct Voxelizer<Ras = VertexRasterizer, Red = FirstSample> {
    config: VoxelizeConfig,
    rasterizer: Ras,
    reducer: Red,
}

impl Voxelizer {
    pub fn new(config: VoxelizeConfig) -> Self {
        Self {
            config,
            rasterizer: VertexRasterizer,
            reducer: FirstSample,
        }
    }
}

impl<Ras, Red> Voxelizer<Ras, Red> {
    #[inline]
    pub fn config(&self) -> &VoxelizeConfig {
        &self.config
    }

    /// Replace the strategy used to merge each cell's samples.
    pub fn with_reducer<R>(self, reducer: R) -> Voxelizer<Ras, R> {
        Voxelizer {
            config: self.config,
            rasterizer: self.rasterizer,
            reducer,
        }
    }

    /// Replace the strategy used to turn mesh geometry into cell samples.
    pub fn with_rasterizer<R>(self, rasterizer: R) -> Voxelizer<R, Red> {
        Voxelizer {
            config: self.config,
            rasterizer,
            reducer: self.reducer,
        }
    }

    /// The [GridMapper] this voxelizer would use for a mesh with the given bounds.
    pub fn mapper<Real: Float>(&self, bounds: Aabb<Real>) -> Result<GridMapper<Real>, Error<Real>> {
        Ok(GridMapper::new(bounds, self.config.resolution)?
            .with_normalization(self.config.normalization)
            .with_range_policy(self.config.range_policy))
    }

    /// Voxelize `mesh`.
    ///
    /// # Errors
    ///
    /// * [`DegenerateMesh`](Error::DegenerateMesh) if `mesh` has no vertices, or they all coincide.
    /// * [`InvalidResolution`](Error::InvalidResolution) if the configured resolution is 0.
    /// * Anything returned by the [Rasterizer].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(resolution = self.config.resolution))
    )]
    pub fn voxelize<Real: Float>(
        &self,
        mesh: &TriMesh<Real>,
    ) -> Result<VoxelizedMesh<Real>, Error<Real>>
    where
        Ras: Rasterizer<Real>,
        Red: SampleReduce<Real>,
    {
        let bounds = Aabb::from_points(mesh.positions());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            min = %bounds.global_min(),
            max = %bounds.global_max(),
            "computed mesh bounds"
        );
        let mapper = self.mapper(bounds)?;

        let mut candidates = CandidateMap::new();
        self.rasterizer.rasterize(mesh, &mapper, &mut candidates)?;

        let res = VoxelizedMesh::resolve(candidates, &mapper, &self.reducer);
        #[cfg(feature = "tracing")]
        tracing::info!(voxels = res.len(), "voxelized mesh");
        Ok(res)
    }

    /// Voxelize `mesh` and expand the result into cubes, positioned per the configured
    /// [CellAnchor].
    pub fn cube_mesh<Real: Float>(&self, mesh: &TriMesh<Real>) -> Result<TriMesh<Real>, Error<Real>>
    where
        Ras: Rasterizer<Real>,
        Red: SampleReduce<Real>,
    {
        Ok(self.voxelize(mesh)?.to_trimesh(self.config.anchor))
    }
}

/// Voxelize `mesh` on a `resolution³` grid with default settings.
pub fn voxelize<Real: Float>(
    mesh: &TriMesh<Real>,
    resolution: u32,
) -> Result<VoxelizedMesh<Real>, Error<Real>> {
    Voxelizer::new(VoxelizeConfig::with_resolution(resolution)).voxelize(mesh)
}
