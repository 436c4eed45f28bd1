use nalgebra::SVector;

use crate::{
    pairing::separators,
    structs::{Dataset, Hyperplane, Pairing, Result},
};

/// Calculates the center of the cover.
/// # Arguments
/// * cover : The probes approximating the boundary.
/// # Returns
/// * com : The mean position of the cover, None when it is empty.
pub fn center_of_mass<const N: usize>(cover: &[SVector<f64, N>]) -> Option<SVector<f64, N>> {
    if cover.is_empty() {
        return None;
    }

    let total: SVector<f64, N> = cover.iter().sum();
    Some(total / cover.len() as f64)
}

/// Mean absolute distance between the probes and a reference hyperplane. For a
/// boundary known to be planar this measures how far the cover is from it.
pub fn mean_plane_deviation<const N: usize>(
    cover: &[SVector<f64, N>],
    plane: &Hyperplane<N>,
) -> f64 {
    if cover.is_empty() {
        return 0.0;
    }

    let total: f64 = cover.iter().map(|p| plane.signed_distance(p).abs()).sum();
    total / cover.len() as f64
}

/// Mean absolute distance between each probe and the bisector of its own
/// neighbor pair. Zero right after an epoch, since each probe was just projected
/// onto that bisector.
/// ## Error (Err)
/// * InvalidInput : If a pair's samples coincide.
pub fn mean_pair_deviation<const N: usize>(
    cover: &[SVector<f64, N>],
    pairing: &Pairing,
    dataset: &Dataset<N>,
) -> Result<f64> {
    let planes = separators(pairing, dataset)?;
    if planes.is_empty() {
        return Ok(0.0);
    }

    let total: f64 = cover
        .iter()
        .zip(planes.iter())
        .map(|(p, plane)| plane.signed_distance(p).abs())
        .sum();

    Ok(total / planes.len() as f64)
}

/// Distinct neighbor pairs per probe, in (0, 1]. Low values mean the cover is
/// concentrated on few pieces of the boundary.
pub fn pair_diversity(pairing: &Pairing) -> f64 {
    if pairing.is_empty() {
        return 0.0;
    }

    crate::boundary_tools::distinct_pairs(pairing) as f64 / pairing.len() as f64
}
