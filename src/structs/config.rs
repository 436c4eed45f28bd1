#[cfg(feature = "io")]
use serde::{Deserialize, Serialize};

use super::{Result, SamplingError};

pub const DEFAULT_N_POINTS: usize = 1000;
pub const DEFAULT_N_EPOCHS: usize = 5;

/// Which formulation projects a probe onto its separating hyperplane. All of
/// them agree within floating point tolerance.
#[cfg_attr(feature = "io", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Hyperplane basis from the QR decomposition of the normal.
    #[default]
    Qr,
    /// Hyperplane basis from the null space (SVD) of the normal.
    NullSpace,
    /// Closed form vector rejection, no basis is built.
    Rejection,
}

/// How each probe's first and second neighbors are located.
#[cfg_attr(feature = "io", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Finder {
    /// Full pairwise distance matrix between the cover and the dataset.
    #[default]
    DistanceMatrix,
    /// R*-tree per label, queried per probe. Scales better for large datasets.
    Indexed,
}

/// Parameters of a single relaxation run.
#[cfg_attr(feature = "io", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationConfig {
    /// Number of probes in the cover.
    pub n_points: usize,
    /// Number of relaxation epochs. There is no early stopping.
    pub n_epochs: usize,
    pub projection: Projection,
    pub finder: Finder,
    /// Seed for the initial slate. None draws a seed from the OS.
    pub seed: Option<u64>,
    /// Keep only one probe per distinct neighbor pair in the output.
    pub distill: bool,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        RelaxationConfig {
            n_points: DEFAULT_N_POINTS,
            n_epochs: DEFAULT_N_EPOCHS,
            projection: Projection::default(),
            finder: Finder::default(),
            seed: None,
            distill: false,
        }
    }
}

impl RelaxationConfig {
    pub fn with_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    pub fn with_epochs(mut self, n_epochs: usize) -> Self {
        self.n_epochs = n_epochs;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_finder(mut self, finder: Finder) -> Self {
        self.finder = finder;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_distill(mut self, distill: bool) -> Self {
        self.distill = distill;
        self
    }

    /// ## Error (Err)
    /// * InvalidInput : If @n_points or @n_epochs is zero.
    pub fn validate(&self) -> Result<()> {
        if self.n_points == 0 {
            return Err(SamplingError::InvalidInput(
                "n_points must be at least 1.".to_string(),
            ));
        }
        if self.n_epochs == 0 {
            return Err(SamplingError::InvalidInput(
                "n_epochs must be at least 1.".to_string(),
            ));
        }
        Ok(())
    }
}
