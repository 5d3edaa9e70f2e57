//! Expansion of voxels into cube geometry.

use hedron::{Face, Rgba, TriMesh};
use nalgebra::{point, Point3};
use sixfold_common::Float;

use crate::{GridPoint, Octant, VoxelSample, VoxelizedMesh};

/// Where a cube sits relative to its grid coordinate.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellAnchor {
    /// The cube is centered on `cell * cell_size`, so it straddles the boundary of the cell it
    /// was mapped from.
    #[default]
    Centered,
    /// The cube fills `cell * cell_size..(cell + 1) * cell_size`.
    Corner,
}

impl CellAnchor {
    #[inline]
    fn offset<Real: Float>(self) -> Real {
        match self {
            Self::Centered => Real::ZERO,
            Self::Corner => Real::HALF,
        }
    }
}

/// The order in which a cube's corners are emitted: `+X+Y+Z, +X+Y-Z, +X-Y+Z, +X-Y-Z, -X+Y+Z,
/// -X+Y-Z, -X-Y+Z, -X-Y-Z`.
pub const CUBE_CORNERS: [Octant; 8] = [
    Octant(7),
    Octant(6),
    Octant(5),
    Octant(4),
    Octant(3),
    Octant(2),
    Octant(1),
    Octant(0),
];

/// The triangles of a cube, as indices into [CUBE_CORNERS]. Two per side.
#[rustfmt::skip]
pub const CUBE_FACES: [[u32; 3]; 12] = [
    [0, 1, 2], [1, 2, 3], // +X
    [4, 5, 6], [5, 6, 7], // -X
    [0, 1, 4], [1, 4, 5], // +Y
    [2, 3, 6], [3, 6, 7], // -Y
    [0, 4, 6], [2, 6, 0], // +Z
    [1, 5, 7], [3, 7, 1], // -Z
];

/// The geometry of a single voxel.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube<Real: Float> {
    pub cell: GridPoint,
    pub center: Point3<Real>,
    /// Edge length.
    pub size: Real,
    /// In [CUBE_CORNERS] order.
    pub corners: [Point3<Real>; 8],
    pub color: Rgba,
}

impl<Real: Float> Cube<Real> {
    /// Construct the cube for the voxel at `cell` in a grid with cells of edge length `size`.
    pub fn new(
        cell: GridPoint,
        attributes: &VoxelSample<Real>,
        size: Real,
        anchor: CellAnchor,
    ) -> Self {
        let off = anchor.offset::<Real>();
        let [x, y, z] = [cell.x, cell.y, cell.z].map(|c| Real::from_u32(c) + off);
        let corners = CUBE_CORNERS.map(|oct| {
            let h = oct.half_offset::<Real>();
            point![(x + h.x) * size, (y + h.y) * size, (z + h.z) * size]
        });
        Self {
            cell,
            center: point![x * size, y * size, z * size],
            size,
            corners,
            color: attributes.color,
        }
    }

    /// This cube's triangles, with indices offset by `base`.
    pub fn faces(&self, base: u32) -> [[u32; 3]; 12] {
        CUBE_FACES.map(|f| f.map(|i| i + base))
    }
}

impl<Real: Float> VoxelizedMesh<Real> {
    /// The cube geometry of each voxel, in voxel order.
    pub fn cubes(&self, anchor: CellAnchor) -> impl Iterator<Item = Cube<Real>> + '_ {
        let size = self.cell_size();
        self.voxels()
            .map(move |(cell, attributes)| Cube::new(*cell, attributes, size, anchor))
    }

    /// Flatten every [Cube] into one mesh.
    ///
    /// Each cube gets its own 8 vertices (colored with its voxel's color) and its own face group;
    /// nothing is shared between neighbouring cubes.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(voxels = self.len())))]
    pub fn to_trimesh(&self, anchor: CellAnchor) -> TriMesh<Real> {
        let mut res = TriMesh::new();
        for cube in self.cubes(anchor) {
            let base = res.positions().len() as u32;
            for p in cube.corners {
                res.push_colored_position(p, cube.color);
            }
            res.push_group_with_faces("", None, cube.faces(base).map(Face::from));
        }
        res
    }
}

#[cfg(test)]
mod test {
    use nalgebra::point;

    use super::*;
    use crate::{spatial::Aabb, CandidateMap, FirstSample, GridMapper};

    fn cube(x: u32, y: u32, z: u32, size: f32, anchor: CellAnchor) -> Cube<f32> {
        Cube::new(point![x, y, z], &VoxelSample::default(), size, anchor)
    }

    #[test]
    fn corners_follow_sign_order() {
        let cube = cube(1, 0, 2, 2.0, CellAnchor::Centered);
        assert_eq!(cube.center, point![2.0, 0.0, 4.0]);
        assert_eq!(cube.corners[0], point![3.0, 1.0, 5.0]);
        assert_eq!(cube.corners[1], point![3.0, 1.0, 3.0]);
        assert_eq!(cube.corners[2], point![3.0, -1.0, 5.0]);
        assert_eq!(cube.corners[7], point![1.0, -1.0, 3.0]);
    }

    #[test]
    fn corner_anchor_fills_the_cell() {
        let cube = cube(1, 0, 2, 2.0, CellAnchor::Corner);
        assert_eq!(cube.center, point![3.0, 1.0, 5.0]);
        assert_eq!(cube.corners[0], point![4.0, 2.0, 6.0]);
        assert_eq!(cube.corners[7], point![2.0, 0.0, 4.0]);
    }

    #[test]
    fn faces_cover_each_corner() {
        let faces = cube(0, 0, 0, 1.0, CellAnchor::Centered).faces(8);
        for corner in 8..16 {
            assert!(faces.iter().flatten().any(|i| *i == corner));
        }
        assert!(faces.iter().flatten().all(|i| (8..16).contains(i)));
    }

    #[test]
    fn each_cube_is_one_closed_group() {
        let mut candidates = CandidateMap::<f32>::new();
        candidates.add_sample(point![0, 0, 0], VoxelSample::from_color(Rgba::BLACK));
        candidates.add_sample(point![1, 1, 0], VoxelSample::default());
        let mapper = GridMapper::new(
            Aabb::new(point![0.0, 0.0, 0.0], point![1.0, 1.0, 1.0]),
            2,
        )
        .unwrap();
        let vox = VoxelizedMesh::resolve(candidates, &mapper, &FirstSample);

        let mesh = vox.to_trimesh(CellAnchor::Centered);
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.groups().len(), 2);
        assert!(mesh.groups().iter().all(|g| g.faces.len() == 12));
        assert_eq!(mesh.color(7), Some(Rgba::BLACK));
        assert_eq!(mesh.color(8), Some(Rgba::WHITE));
        assert_eq!(mesh.positions()[8], point![0.75, 0.75, 0.25]);
    }
}
