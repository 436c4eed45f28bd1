pub mod distance_matrix;
pub mod indexed;

pub use distance_matrix::{pairwise_distances, DistanceMatrixFinder};
pub use indexed::IndexedFinder;

use nalgebra::SVector;

use crate::structs::{Dataset, Finder, Hyperplane, Pairing, Result};

/// Matches every probe of a cover with its nearest sample (first) and its nearest
/// sample of a different label than first (second).
///
/// Ties between equally distant samples always resolve to the lowest sample
/// index, so the pairing of a given cover is deterministic.
pub trait PairFinder<const N: usize>: Send + Sync {
    /// ## Error (Err)
    /// * DegenerateBoundary : If a probe's first neighbor has no differently
    ///   labelled sample to pair with.
    fn find_pairs(&self, cover: &[SVector<f64, N>]) -> Result<Pairing>;

    fn name(&self) -> &'static str;
}

impl Finder {
    /// Builds the pair finder this variant names over @dataset.
    pub fn build<'a, const N: usize>(&self, dataset: &'a Dataset<N>) -> Box<dyn PairFinder<N> + 'a> {
        match self {
            Finder::DistanceMatrix => Box::new(DistanceMatrixFinder::new(dataset)),
            Finder::Indexed => Box::new(IndexedFinder::new(dataset)),
        }
    }
}

/// Finds the first and second neighbors of each probe in @cover using the full
/// distance matrix.
pub fn find_pairs<const N: usize>(
    cover: &[SVector<f64, N>],
    dataset: &Dataset<N>,
) -> Result<Pairing> {
    DistanceMatrixFinder::new(dataset).find_pairs(cover)
}

/// The separating hyperplane of every probe in @pairing: the perpendicular
/// bisector of its first and second neighbors.
/// ## Error (Err)
/// * InvalidInput : If a probe's first and second neighbors coincide, e.g. the
///   same coordinates appear in the dataset under two labels.
pub fn separators<const N: usize>(
    pairing: &Pairing,
    dataset: &Dataset<N>,
) -> Result<Vec<Hyperplane<N>>> {
    pairing
        .iter()
        .map(|pair| Hyperplane::between(dataset.point(pair.first), dataset.point(pair.second)))
        .collect()
}
