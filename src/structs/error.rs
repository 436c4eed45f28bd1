use thiserror::Error;

use super::Label;

/// An error that occurred while relaxing a cover onto the decision boundary of a
/// labelled dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// The caller supplied data or parameters the sampler cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A probe's nearest sample carries a label with no differently labelled
    /// sample to pair against.
    #[error("degenerate boundary: probe {probe} has nearest label {label} with no opposing label present")]
    DegenerateBoundary { probe: usize, label: Label },
}

/// The Result type from sampling a decision boundary.
pub type Result<T> = std::result::Result<T, SamplingError>;
