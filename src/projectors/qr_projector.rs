use nalgebra::SVector;

use crate::{
    projector_core::HyperplaneProjector,
    structs::{unit_direction, Result},
};

use super::{normal_matrix, project_onto_basis};

/// Projects onto a hyperplane by building its orthonormal basis from a QR
/// decomposition.
///
/// The transposed normal matrix has @v as its only nonzero column, so Q's first
/// column is parallel to @v and the remaining N - 1 columns span the
/// hyperplane. The offset from the center is re-expressed in that basis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QrProjector;

impl<const N: usize> HyperplaneProjector<N> for QrProjector {
    fn project(
        &self,
        p: &SVector<f64, N>,
        center: &SVector<f64, N>,
        v: &SVector<f64, N>,
    ) -> Result<SVector<f64, N>> {
        let v = unit_direction(v)?;

        let q = normal_matrix(&v).transpose().qr().q();
        let basis = (1..N).map(|i| q.column(i).into_owned());

        Ok(center + project_onto_basis(&(p - center), basis))
    }

    fn name(&self) -> &'static str {
        "qr"
    }
}
