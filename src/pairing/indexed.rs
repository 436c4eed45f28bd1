use std::collections::BTreeMap;

use nalgebra::SVector;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rstar::{primitives::GeomWithData, RTree};

use crate::{
    structs::{Dataset, Label, NeighborPair, Pairing, Result, SamplingError},
    utils::{argmin_by_index, svector_to_array},
};

use super::PairFinder;

pub type KnnNode<const N: usize> = GeomWithData<[f64; N], usize>;
pub type SampleRTree<const N: usize> = RTree<KnnNode<N>>;

/// Pairs probes through nearest neighbor queries against R*-trees: one over all
/// samples for first, and one per label so that second can be found among the
/// other labels without visiting first's own.
pub struct IndexedFinder<'a, const N: usize> {
    dataset: &'a Dataset<N>,
    all: SampleRTree<N>,
    by_label: BTreeMap<Label, SampleRTree<N>>,
}

/// Places the samples at @indices within an RTree, keyed by their index in
/// @points.
pub fn get_rtree_from_points<const N: usize>(
    points: &[SVector<f64, N>],
    indices: impl Iterator<Item = usize>,
) -> SampleRTree<N> {
    RTree::bulk_load(
        indices
            .map(|i| KnnNode::new(svector_to_array(points[i]), i))
            .collect(),
    )
}

/// The sample in @tree nearest to @p and its squared distance. Equally distant
/// samples resolve to the lowest index.
fn nearest<const N: usize>(tree: &SampleRTree<N>, p: &[f64; N]) -> Option<(usize, f64)> {
    let mut iter = tree.nearest_neighbor_iter_with_distance_2(p);
    let (node, d2) = iter.next()?;
    let mut best = (node.data, d2);

    for (node, d2) in iter {
        if d2 > best.1 {
            break;
        }
        best.0 = best.0.min(node.data);
    }

    Some(best)
}

impl<'a, const N: usize> IndexedFinder<'a, N> {
    pub fn new(dataset: &'a Dataset<N>) -> Self {
        let points = dataset.points();
        let all = get_rtree_from_points(points, 0..points.len());

        let groups = dataset.groups();
        let by_label = groups
            .labels()
            .map(|label| {
                let members = groups.members(label).iter().copied();
                (label, get_rtree_from_points(points, members))
            })
            .collect();

        IndexedFinder {
            dataset,
            all,
            by_label,
        }
    }

    fn pair_probe(&self, probe: usize, p: &SVector<f64, N>) -> Result<NeighborPair> {
        let p = svector_to_array(*p);

        let (first, _) = nearest(&self.all, &p).ok_or_else(|| {
            SamplingError::InvalidInput(format!("Probe {probe} has no nearest sample."))
        })?;

        let label = self.dataset.label(first);

        let (second, _) = argmin_by_index(
            self.by_label
                .iter()
                .filter(|&(&other, _)| other != label)
                .filter_map(|(_, tree)| nearest(tree, &p)),
        )
        .ok_or(SamplingError::DegenerateBoundary { probe, label })?;

        log::trace!("probe {probe} paired with ({first}, {second})");

        Ok(NeighborPair::new(first, second))
    }
}

impl<'a, const N: usize> PairFinder<N> for IndexedFinder<'a, N> {
    fn find_pairs(&self, cover: &[SVector<f64, N>]) -> Result<Pairing> {
        #[cfg(feature = "parallel")]
        let pairs = cover
            .par_iter()
            .enumerate()
            .map(|(i, p)| self.pair_probe(i, p))
            .collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let pairs = cover
            .iter()
            .enumerate()
            .map(|(i, p)| self.pair_probe(i, p))
            .collect::<Result<Vec<_>>>()?;

        Ok(pairs.into_iter().collect())
    }

    fn name(&self) -> &'static str {
        "indexed"
    }
}
