use nalgebra::SVector;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    search::{SlateGenerator, UniformSlate},
    structs::{Dataset, Domain, Hyperplane, Label, Result},
};

/// Labelled blobs of points. Each cluster is @per_cluster points drawn uniformly
/// from the box of half-width @spread around its center.
/// ## Arguments
/// * centers : The center of each cluster and the label its points receive.
/// * spread : Half the side length of each cluster's box.
/// * per_cluster : The number of points per cluster.
/// * seed : Seed for the point positions.
pub fn clusters<const N: usize>(
    centers: &[(SVector<f64, N>, Label)],
    spread: f64,
    per_cluster: usize,
    seed: u64,
) -> Result<Dataset<N>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let half = SVector::<f64, N>::repeat(spread.abs());

    let mut points = Vec::with_capacity(centers.len() * per_cluster);
    let mut labels = Vec::with_capacity(centers.len() * per_cluster);

    for (center, label) in centers {
        let domain = Domain::new(center - half, center + half);
        let mut blob = UniformSlate::with_rng(domain, &mut rng);
        points.extend(blob.take(per_cluster));
        labels.extend(std::iter::repeat(*label).take(per_cluster));
    }

    Dataset::new(points, labels)
}

/// Two clusters of @per_cluster points, one around @a labelled 0 and one
/// around @b labelled 1.
pub fn two_clusters<const N: usize>(
    a: SVector<f64, N>,
    b: SVector<f64, N>,
    spread: f64,
    per_cluster: usize,
    seed: u64,
) -> Result<Dataset<N>> {
    clusters(&[(a, 0), (b, 1)], spread, per_cluster, seed)
}

/// @n points drawn uniformly from @domain, labelled 1 on the side @plane's
/// normal points to and 0 otherwise. The true decision boundary is @plane.
pub fn split_by_plane<const N: usize>(
    domain: Domain<N>,
    plane: &Hyperplane<N>,
    n: usize,
    seed: u64,
) -> Result<Dataset<N>> {
    let mut slate = UniformSlate::from_seed(domain, seed);
    let points = slate.take(n);
    let labels = points
        .iter()
        .map(|p| Label::from(plane.signed_distance(p) > 0.0))
        .collect();

    Dataset::new(points, labels)
}
