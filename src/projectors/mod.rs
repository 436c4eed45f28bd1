pub mod null_space_projector;
pub mod qr_projector;
pub mod rejection_projector;

pub use null_space_projector::NullSpaceProjector;
pub use qr_projector::QrProjector;
pub use rejection_projector::RejectionProjector;

use nalgebra::{DMatrix, DVector, SVector};

use crate::{projector_core::HyperplaneProjector, structs::Projection};

impl Projection {
    /// Builds the projector this variant names.
    pub fn build<const N: usize>(&self) -> Box<dyn HyperplaneProjector<N>> {
        match self {
            Projection::Qr => Box::new(QrProjector),
            Projection::NullSpace => Box::new(NullSpaceProjector),
            Projection::Rejection => Box::new(RejectionProjector),
        }
    }
}

/// The N x N matrix whose first row is @v and every other row is zero. Its row
/// space is span(v), so its null space is the hyperplane normal to @v.
fn normal_matrix<const N: usize>(v: &SVector<f64, N>) -> DMatrix<f64> {
    DMatrix::from_fn(N, N, |i, j| if i == 0 { v[j] } else { 0.0 })
}

/// Sums the components of @w along each column of @basis, i.e. the projection of
/// @w onto the column space of an orthonormal @basis.
fn project_onto_basis<const N: usize>(
    w: &SVector<f64, N>,
    basis: impl IntoIterator<Item = DVector<f64>>,
) -> SVector<f64, N> {
    let w = DVector::from_column_slice(w.as_slice());
    let mut total = DVector::zeros(N);
    for q in basis {
        total += &q * q.dot(&w);
    }
    SVector::from_column_slice(total.as_slice())
}
