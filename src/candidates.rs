use indexmap::IndexMap;
use sixfold_common::Float;

use crate::{GridPoint, VoxelSample};

/// Every [VoxelSample] recorded for each occupied grid cell, prior to reduction.
///
/// Cells are kept in the order they were first touched, and samples within a cell in the order
/// they were added, so that a given rasterization always yields the same sequence.
#[derive(Debug, Clone)]
pub struct CandidateMap<Real: Float> {
    cells: IndexMap<GridPoint, Vec<VoxelSample<Real>>>,
    samples: usize,
}

impl<Real: Float> Default for CandidateMap<Real> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Real: Float> CandidateMap<Real> {
    pub fn new() -> Self {
        Self {
            cells: IndexMap::new(),
            samples: 0,
        }
    }

    /// Record `sample` at `cell`.
    pub fn add_sample(&mut self, cell: GridPoint, sample: VoxelSample<Real>) {
        self.samples += 1;
        self.cells.entry(cell).or_default().push(sample);
    }

    /// The samples recorded at `cell`, if any.
    pub fn get(&self, cell: &GridPoint) -> Option<&[VoxelSample<Real>]> {
        self.cells.get(cell).map(Vec::as_slice)
    }

    /// Number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of samples over all cells.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridPoint, &[VoxelSample<Real>])> + '_ {
        self.cells.iter().map(|(p, s)| (p, s.as_slice()))
    }
}

impl<Real: Float> IntoIterator for CandidateMap<Real> {
    type Item = (GridPoint, Vec<VoxelSample<Real>>);
    type IntoIter = indexmap::map::IntoIter<GridPoint, Vec<VoxelSample<Real>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}
