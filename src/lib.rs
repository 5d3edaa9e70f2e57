//! Sparse voxelization of triangle meshes.
//!
//! A [Voxelizer] runs a mesh through four stages:
//!
//! 1. a [GridMapper], derived from the mesh's bounding box, maps each vertex to a cell of a
//!    `resolution³` grid;
//! 2. a [Rasterizer] records one [VoxelSample] per face corner in a [CandidateMap];
//! 3. a [SampleReduce] strategy collapses each occupied cell's samples into a single voxel;
//! 4. the resulting [VoxelizedMesh] expands each voxel into a [Cube], and from there into a
//!    [TriMesh](hedron::TriMesh) ready for export.
//!
//! Only vertices are rasterized: triangle interiors never occupy cells on their own.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod error;
pub mod spatial;

mod candidates;
mod emit;
mod grid;
mod octant;
mod raster;
mod resolve;
mod sample;
mod voxelize;

pub use candidates::*;
pub use emit::*;
pub use error::Error;
pub use grid::*;
pub use octant::*;
pub use raster::*;
pub use resolve::*;
pub use sample::*;
pub use voxelize::*;

pub use hedron;
pub use sixfold_common::Float;
