use nalgebra::SVector;

use crate::{
    projector_core::HyperplaneProjector,
    structs::{unit_direction, Result},
};

/// Projects onto a hyperplane by subtracting the component of the offset from
/// the center that lies along the normal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RejectionProjector;

impl<const N: usize> HyperplaneProjector<N> for RejectionProjector {
    fn project(
        &self,
        p: &SVector<f64, N>,
        center: &SVector<f64, N>,
        v: &SVector<f64, N>,
    ) -> Result<SVector<f64, N>> {
        let v = unit_direction(v)?;
        let w = p - center;

        Ok(center + w - v * w.dot(&v))
    }

    fn name(&self) -> &'static str {
        "rejection"
    }
}
