//! Rasterization of mesh geometry into [candidate samples](CandidateMap).

use hedron::{Corner, FaceGroup, Rgba, TriMesh};
use sixfold_common::Float;

use crate::{error::Error, CandidateMap, GridMapper, VoxelSample};

/// Define how a mesh's geometry is turned into voxel candidates.
///
/// This is where a true triangle/cell intersection test would live; the only implementation at
/// the moment is [VertexRasterizer].
pub trait Rasterizer<Real: Float> {
    /// Record a sample in `candidates` for every cell that `mesh` occupies.
    fn rasterize(
        &self,
        mesh: &TriMesh<Real>,
        mapper: &GridMapper<Real>,
        candidates: &mut CandidateMap<Real>,
    ) -> Result<(), Error<Real>>;
}

/// Rasterizes only the corners of each triangle.
///
/// Every corner of every face yields one sample, so a vertex shared between `n` faces is
/// recorded `n` times. Triangle interiors are ignored: faces large relative to a cell leave
/// gaps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VertexRasterizer;

impl<Real: Float> Rasterizer<Real> for VertexRasterizer {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(faces = mesh.face_count()))
    )]
    fn rasterize(
        &self,
        mesh: &TriMesh<Real>,
        mapper: &GridMapper<Real>,
        candidates: &mut CandidateMap<Real>,
    ) -> Result<(), Error<Real>> {
        for (group, face) in mesh.faces() {
            for corner in &face.corners {
                let position = mesh.position(corner.position)?;
                let cell = mapper.map(position)?;
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    x = cell.x,
                    y = cell.y,
                    z = cell.z,
                    "vertex {} to voxel",
                    corner.position
                );
                candidates.add_sample(cell, corner_sample(mesh, group, corner)?);
            }
        }
        Ok(())
    }
}

/// The attributes of one face corner.
///
/// Color comes from the vertex color if there is one, then the group's material, then defaults to
/// opaque white.
pub fn corner_sample<Real: Float>(
    mesh: &TriMesh<Real>,
    group: &FaceGroup,
    corner: &Corner,
) -> Result<VoxelSample<Real>, Error<Real>> {
    let color = match (mesh.color(corner.position), group.material) {
        (Some(c), _) => c,
        (None, Some(m)) => mesh.material(m)?.diffuse,
        (None, None) => Rgba::WHITE,
    };
    Ok(VoxelSample {
        color,
        normal: corner.normal.map(|n| mesh.normal(n).copied()).transpose()?,
        uv: corner.uv.map(|t| mesh.uv(t).copied()).transpose()?,
    })
}

#[cfg(test)]
mod test {
    use hedron::{Corner, Face, Material, Rgba, TriMesh};
    use nalgebra::{point, vector};

    use super::*;
    use crate::spatial::Aabb;

    #[test]
    fn shared_vertices_are_sampled_per_face() {
        let mesh = TriMesh::<f32>::from_triangles(
            [
                point![0.0, 0.0, 0.0],
                point![1.0, 0.0, 0.0],
                point![0.0, 1.0, 0.0],
                point![1.0, 1.0, 0.0],
            ],
            [[0, 1, 2], [1, 3, 2]],
        );
        let bounds = Aabb::from_points(mesh.positions());
        let mapper = GridMapper::new(bounds, 2).unwrap();
        let mut candidates = CandidateMap::new();
        VertexRasterizer
            .rasterize(&mesh, &mapper, &mut candidates)
            .unwrap();
        assert_eq!(candidates.sample_count(), 6);
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates.get(&point![1, 0, 0]).map(<[_]>::len), Some(2));
        assert!(candidates
            .iter()
            .flat_map(|(_, s)| s)
            .all(|s| *s == VoxelSample::default()));
    }

    #[test]
    fn color_precedence() {
        let mut mesh = TriMesh::<f64>::new();
        let plain = mesh.push_position(point![0.0, 0.0, 0.0]);
        let tinted = mesh.push_colored_position(point![1.0, 0.0, 0.0], Rgba::BLACK);
        let n = mesh.push_normal(vector![0.0, 0.0, 1.0]);
        let uv = mesh.push_uv(point![0.25, 0.75]);
        let red = mesh.push_material(Material {
            name: "red".into(),
            diffuse: Rgba::rgb(1.0, 0.0, 0.0),
        });
        let g = mesh.push_group("g", Some(red));
        let corner = Corner {
            position: plain,
            normal: Some(n),
            uv: Some(uv),
        };
        mesh.push_face(g, Face::new(corner, tinted, plain)).unwrap();
        let group = &mesh.groups()[g];

        let s = corner_sample(&mesh, group, &corner).unwrap();
        assert_eq!(s.color, Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(s.normal, Some(vector![0.0, 0.0, 1.0]));
        assert_eq!(s.uv, Some(point![0.25, 0.75]));

        let s = corner_sample(&mesh, group, &Corner::new(tinted)).unwrap();
        assert_eq!(s.color, Rgba::BLACK);
        assert_eq!(s.normal, None);
    }

    #[test]
    fn dangling_normal_is_an_error() {
        let mesh = TriMesh::<f32>::from_triangles([point![0.0, 0.0, 0.0]], []);
        let corner = Corner {
            normal: Some(3),
            ..Corner::new(0)
        };
        assert!(matches!(
            corner_sample(&mesh, &Default::default(), &corner),
            Err(Error::Mesh(_))
        ));
    }
}
