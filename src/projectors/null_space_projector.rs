use nalgebra::SVector;

use crate::{
    projector_core::HyperplaneProjector,
    structs::{unit_direction, Result, SamplingError},
};

use super::{normal_matrix, project_onto_basis};

/// Projects onto a hyperplane by building its orthonormal basis as the null
/// space of the normal matrix, found through its singular value decomposition.
///
/// The normal matrix has rank 1, so the null space is spanned by every right
/// singular vector except the one paired with the largest singular value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NullSpaceProjector;

impl<const N: usize> HyperplaneProjector<N> for NullSpaceProjector {
    fn project(
        &self,
        p: &SVector<f64, N>,
        center: &SVector<f64, N>,
        v: &SVector<f64, N>,
    ) -> Result<SVector<f64, N>> {
        let v = unit_direction(v)?;

        let svd = normal_matrix(&v)
            .try_svd(false, true, f64::EPSILON, 0)
            .ok_or_else(|| {
                SamplingError::InvalidInput("SVD of the normal matrix did not converge.".to_string())
            })?;
        let v_t = svd.v_t.ok_or_else(|| {
            SamplingError::InvalidInput("SVD did not produce right singular vectors.".to_string())
        })?;

        let row_space = svd.singular_values.imax();
        let basis = (0..v_t.nrows())
            .filter(|&i| i != row_space)
            .map(|i| v_t.row(i).transpose());

        Ok(center + project_onto_basis(&(p - center), basis))
    }

    fn name(&self) -> &'static str {
        "null_space"
    }
}
