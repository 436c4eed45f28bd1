use std::collections::BTreeMap;

use nalgebra::{DMatrix, SVector};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    structs::{Dataset, Label, NeighborPair, Pairing, Result, SamplingError},
    utils::argmin_by_index,
};

use super::PairFinder;

/// Pairs probes by computing every probe-to-sample distance up front, then
/// minimizing each row; once over all samples for first, and once more over the
/// samples whose label differs from first's for second.
pub struct DistanceMatrixFinder<'a, const N: usize> {
    dataset: &'a Dataset<N>,
    // For each label, which samples carry it.
    masks: BTreeMap<Label, Vec<bool>>,
}

/// The Euclidean distance between every point of @a (rows) and every point of @b
/// (columns).
pub fn pairwise_distances<const N: usize>(
    a: &[SVector<f64, N>],
    b: &[SVector<f64, N>],
) -> DMatrix<f64> {
    DMatrix::from_fn(a.len(), b.len(), |i, j| (a[i] - b[j]).norm())
}

impl<'a, const N: usize> DistanceMatrixFinder<'a, N> {
    pub fn new(dataset: &'a Dataset<N>) -> Self {
        let groups = dataset.groups();
        let masks = groups
            .labels()
            .map(|label| {
                let mut mask = vec![false; dataset.len()];
                for &i in groups.members(label) {
                    mask[i] = true;
                }
                (label, mask)
            })
            .collect();

        DistanceMatrixFinder { dataset, masks }
    }

    fn pair_row(&self, probe: usize, distances: &DMatrix<f64>) -> Result<NeighborPair> {
        let row = distances.row(probe);

        let (first, _) = argmin_by_index(row.iter().copied().enumerate()).ok_or_else(|| {
            SamplingError::InvalidInput(format!("Probe {probe} has no finite distance."))
        })?;

        let label = self.dataset.label(first);
        let excluded = &self.masks[&label];

        let (second, _) = argmin_by_index(
            row.iter()
                .copied()
                .enumerate()
                .filter(|&(j, _)| !excluded[j]),
        )
        .ok_or(SamplingError::DegenerateBoundary { probe, label })?;

        log::trace!("probe {probe} paired with ({first}, {second})");

        Ok(NeighborPair::new(first, second))
    }
}

impl<'a, const N: usize> PairFinder<N> for DistanceMatrixFinder<'a, N> {
    fn find_pairs(&self, cover: &[SVector<f64, N>]) -> Result<Pairing> {
        let distances = pairwise_distances(cover, self.dataset.points());

        #[cfg(feature = "parallel")]
        let pairs = (0..cover.len())
            .into_par_iter()
            .map(|i| self.pair_row(i, &distances))
            .collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let pairs = (0..cover.len())
            .map(|i| self.pair_row(i, &distances))
            .collect::<Result<Vec<_>>>()?;

        Ok(pairs.into_iter().collect())
    }

    fn name(&self) -> &'static str {
        "distance_matrix"
    }
}
