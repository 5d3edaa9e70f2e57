//! Randomized checks of the voxelization invariants.

use std::collections::HashSet;

use hedron::TriMesh;
use nalgebra::point;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use sixfold::{spatial::Aabb, CellAnchor, RangePolicy, VoxelizeConfig, Voxelizer};

/// A fan of triangles over integer-valued positions; quickcheck's own floats include NaN and
/// infinities, which make every mesh degenerate.
fn mesh(points: &[(u8, u8, u8)]) -> TriMesh<f32> {
    let n = points.len() as u32;
    TriMesh::from_triangles(
        points
            .iter()
            .map(|&(x, y, z)| point![x as f32, y as f32, z as f32] * 0.25),
        (0..n).map(|i| [i, (i + 1) % n, (i + 2) % n]),
    )
}

fn config(resolution: u8) -> VoxelizeConfig {
    VoxelizeConfig::with_resolution(u32::from(resolution % 16) + 1)
}

fn usable(points: &[(u8, u8, u8)]) -> bool {
    let bounds = Aabb::from_points(mesh(points).positions());
    bounds.global_span().is_ok()
}

#[quickcheck]
fn cells_stay_in_grid(points: Vec<(u8, u8, u8)>, resolution: u8) -> TestResult {
    if !usable(&points) {
        return TestResult::discard();
    }
    let config = config(resolution);
    let vox = Voxelizer::new(config).voxelize(&mesh(&points)).unwrap();
    TestResult::from_bool(
        !vox.is_empty()
            && vox
                .cells()
                .all(|cell| cell.iter().all(|c| *c < config.resolution)),
    )
}

#[quickcheck]
fn rejecting_never_leaves_the_grid(points: Vec<(u8, u8, u8)>, resolution: u8) -> TestResult {
    if !usable(&points) {
        return TestResult::discard();
    }
    let mut config = config(resolution);
    config.range_policy = RangePolicy::Reject;
    match Voxelizer::new(config).voxelize(&mesh(&points)) {
        Ok(vox) => TestResult::from_bool(
            vox.cells()
                .all(|cell| cell.iter().all(|c| *c < config.resolution)),
        ),
        Err(_) => TestResult::passed(),
    }
}

#[quickcheck]
fn one_voxel_per_occupied_cell(points: Vec<(u8, u8, u8)>, resolution: u8) -> TestResult {
    if !usable(&points) {
        return TestResult::discard();
    }
    let config = config(resolution);
    let mesh = mesh(&points);
    let voxelizer = Voxelizer::new(config);
    let vox = voxelizer.voxelize(&mesh).unwrap();

    let cells: HashSet<_> = vox.cells().copied().collect();
    let mapper = voxelizer
        .mapper(Aabb::from_points(mesh.positions()))
        .unwrap();
    let expected: HashSet<_> = mesh
        .positions()
        .iter()
        .map(|p| mapper.map(p).unwrap())
        .collect();
    TestResult::from_bool(cells.len() == vox.len() && cells == expected)
}

#[quickcheck]
fn voxelization_is_deterministic(points: Vec<(u8, u8, u8)>, resolution: u8) -> TestResult {
    if !usable(&points) {
        return TestResult::discard();
    }
    let voxelizer = Voxelizer::new(config(resolution));
    let mesh = mesh(&points);
    let (a, b) = (
        voxelizer.voxelize(&mesh).unwrap(),
        voxelizer.voxelize(&mesh).unwrap(),
    );
    TestResult::from_bool(a.voxels().eq(b.voxels()))
}

#[quickcheck]
fn cubes_are_closed_around_their_center(
    points: Vec<(u8, u8, u8)>,
    resolution: u8,
    corner: bool,
) -> TestResult {
    if !usable(&points) {
        return TestResult::discard();
    }
    let anchor = match corner {
        true => CellAnchor::Corner,
        false => CellAnchor::Centered,
    };
    let vox = Voxelizer::new(config(resolution))
        .voxelize(&mesh(&points))
        .unwrap();
    let reach = vox.cell_size() * 3f32.sqrt() / 2.0 * 1.0001;

    let near = vox.cubes(anchor).all(|cube| {
        cube.corners
            .iter()
            .all(|c| (c - cube.center).norm() <= reach)
    });

    let cubes = vox.to_trimesh(anchor);
    let closed = cubes.positions().len() == 8 * vox.len()
        && cubes.groups().len() == vox.len()
        && cubes.groups().iter().enumerate().all(|(i, g)| {
            let block = (8 * i as u32)..(8 * i as u32 + 8);
            g.faces.len() == 12
                && g.faces
                    .iter()
                    .flat_map(|f| f.corners.iter())
                    .all(|c| block.contains(&c.position))
        });
    TestResult::from_bool(near && closed)
}
