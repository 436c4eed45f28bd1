use std::collections::HashSet;

use nalgebra::SVector;

use crate::structs::{NeighborPair, Pairing};

/// Counts the distinct unordered neighbor pairs in @pairing. Each distinct pair
/// is one local piece of the estimated boundary.
pub fn distinct_pairs(pairing: &Pairing) -> usize {
    pairing
        .iter()
        .map(|pair| pair.unordered())
        .collect::<HashSet<NeighborPair>>()
        .len()
}

/// Thins a cover down to one probe per distinct unordered neighbor pair, keeping
/// the first probe seen for each pair. Probes that share a pair sit on the same
/// bisector, so the sparse cover still touches every piece of the boundary.
/// ## Arguments
/// * cover : The probes, after being projected using @pairing.
/// * pairing : The pairing that @cover was projected with.
/// ## Panic
/// When @cover and @pairing differ in length.
pub fn distill<const N: usize>(
    cover: &[SVector<f64, N>],
    pairing: &Pairing,
) -> Vec<SVector<f64, N>> {
    assert_eq!(
        cover.len(),
        pairing.len(),
        "Cover and pairing must describe the same probes."
    );

    let mut seen = HashSet::new();
    cover
        .iter()
        .zip(pairing.iter())
        .filter(|(_, pair)| seen.insert(pair.unordered()))
        .map(|(p, _)| *p)
        .collect()
}
