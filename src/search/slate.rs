use nalgebra::SVector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::structs::{Domain, Result, SamplingError};

use super::SlateGenerator;

/// Draws probes independently and uniformly from a domain. The generator state
/// is owned by the slate, so two slates built from the same seed produce the
/// same probes.
pub struct UniformSlate<const N: usize, R = ChaCha8Rng>
where
    R: Rng,
{
    rng: R,
    domain: Domain<N>,
}

impl<const N: usize> UniformSlate<N, ChaCha8Rng> {
    /// A reproducible slate over @domain.
    pub fn from_seed(domain: Domain<N>, seed: u64) -> Self {
        UniformSlate::with_rng(domain, ChaCha8Rng::seed_from_u64(seed))
    }

    /// A slate over @domain seeded from the operating system.
    pub fn from_entropy(domain: Domain<N>) -> Self {
        UniformSlate::with_rng(domain, ChaCha8Rng::from_entropy())
    }
}

impl<const N: usize, R: Rng> UniformSlate<N, R> {
    pub fn with_rng(domain: Domain<N>, rng: R) -> Self {
        UniformSlate { rng, domain }
    }
}

impl<const N: usize, R: Rng> SlateGenerator<N> for UniformSlate<N, R> {
    fn sample(&mut self) -> SVector<f64, N> {
        let v: SVector<f64, N> = SVector::from_fn(|_, _| self.rng.gen());
        v.component_mul(&self.domain.dimensions()) + self.domain.low()
    }

    fn get_domain(&self) -> &Domain<N> {
        &self.domain
    }
}

/// Draws @n_points probes uniformly from the bounding box of @cloud.
/// ## Error (Err)
/// * InvalidInput : If @cloud is empty or @n_points is 0.
pub fn make_slate<const N: usize, R: Rng>(
    cloud: &[SVector<f64, N>],
    n_points: usize,
    rng: R,
) -> Result<Vec<SVector<f64, N>>> {
    if n_points == 0 {
        return Err(SamplingError::InvalidInput(
            "n_points must be at least 1.".to_string(),
        ));
    }
    let domain = Domain::new_from_point_cloud(cloud)?;
    let mut slate = UniformSlate::with_rng(domain, rng);
    Ok(slate.take(n_points))
}
