use nalgebra::SVector;

use crate::structs::Domain;

pub mod slate;

pub use slate::{make_slate, UniformSlate};

/// A source of initial probe positions within a domain.
pub trait SlateGenerator<const N: usize> {
    fn sample(&mut self) -> SVector<f64, N>;
    fn get_domain(&self) -> &Domain<N>;

    /// Draws @n_points probes.
    fn take(&mut self, n_points: usize) -> Vec<SVector<f64, N>> {
        (0..n_points).map(|_| self.sample()).collect()
    }
}
