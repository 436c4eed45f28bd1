// The core components of a hyperplane projector

use nalgebra::SVector;

use crate::structs::{Hyperplane, Result};

/// Orthogonally projects a point onto the hyperplane through a center with a
/// given normal. Implementations differ in how they build the projection, not in
/// the result.
pub trait HyperplaneProjector<const N: usize>: Send + Sync {
    /// Projects @p onto the hyperplane through @center normal to @v.
    /// ## Arguments
    /// * p : The point being projected.
    /// * center : Any point on the hyperplane.
    /// * v : The hyperplane's normal, need not be normalized.
    /// ## Error (Err)
    /// * InvalidInput : If @v has zero norm.
    fn project(
        &self,
        p: &SVector<f64, N>,
        center: &SVector<f64, N>,
        v: &SVector<f64, N>,
    ) -> Result<SVector<f64, N>>;

    /// Projects @p onto @plane.
    fn project_onto(&self, p: &SVector<f64, N>, plane: &Hyperplane<N>) -> Result<SVector<f64, N>> {
        self.project(p, plane.center(), plane.normal())
    }

    fn name(&self) -> &'static str;
}
