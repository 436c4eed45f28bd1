pub mod config;
pub mod dataset;
pub mod error;
pub mod report;

pub use config::*;
pub use dataset::*;
pub use error::*;
pub use report::*;

use core::fmt;

use nalgebra::SVector;

use crate::utils::vector_to_string;

/// A class label attached to each sample of a dataset.
pub type Label = i64;

/// An N-dimensional hyperrectangle that is defined by an lower and upper bound (low
/// and high). Used as the region the initial slate of probes is drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain<const N: usize> {
    low: SVector<f64, N>,
    high: SVector<f64, N>,
}

/// A hyperplane passing through @center, oriented by the unit vector @normal.
/// Between two samples of differing class, this is the perpendicular bisector
/// used as the local approximation of the decision boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperplane<const N: usize> {
    center: SVector<f64, N>,
    normal: SVector<f64, N>,
}

/// The pair of samples a single probe was matched with: its nearest sample
/// overall, and its nearest sample carrying a different label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborPair {
    pub first: usize,
    pub second: usize,
}

/// The pairing of every probe in a cover for one epoch. Index i of @first and
/// @second belongs to probe i.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pairing {
    first: Vec<usize>,
    second: Vec<usize>,
}

impl<const N: usize> Domain<N> {
    /// Returns a domain bounded by the two points.
    pub fn new(p1: SVector<f64, N>, p2: SVector<f64, N>) -> Self {
        let low = p1.zip_map(&p2, |a, b| a.min(b));
        let high = p1.zip_map(&p2, |a, b| a.max(b));

        Domain { low, high }
    }

    /// Returns a Domain bounded between 0 and 1 for all dimensions.
    pub fn normalized() -> Self {
        let low = SVector::<f64, N>::zeros();
        let high = SVector::<f64, N>::repeat(1.0);
        Domain { low, high }
    }

    /// Returns the smallest domain to encompass the point cloud. The domain
    /// represents the upper and lower bound of each dimension for the point cloud.
    /// ## Arguments
    /// * cloud : The points to enclose within the domain.
    /// ## Returns
    /// * Ok(domain) : The minimum size Domain that contains all points in @cloud.
    /// ## Error (Err)
    /// * InvalidInput : When @cloud is empty or N is 0, since the bounds are
    ///   undefined.
    pub fn new_from_point_cloud(cloud: &[SVector<f64, N>]) -> Result<Self> {
        if N == 0 {
            return Err(SamplingError::InvalidInput(
                "Points must have at least one feature.".to_string(),
            ));
        }

        let first = cloud.first().ok_or_else(|| {
            SamplingError::InvalidInput("Point cloud is empty, bounds are undefined.".to_string())
        })?;

        let mut low = *first;
        let mut high = *first;

        for p in cloud.iter().skip(1) {
            low = low.zip_map(p, |a, b| a.min(b));
            high = high.zip_map(p, |a, b| a.max(b));
        }

        Ok(Domain { low, high })
    }

    /// The lower bound of the domain.
    pub fn low(&self) -> &SVector<f64, N> {
        &self.low
    }

    /// The upper bound of the domain.
    pub fn high(&self) -> &SVector<f64, N> {
        &self.high
    }

    /// The N-dimensional hypervolume that the domain occupies.
    pub fn volume(&self) -> f64 {
        self.dimensions().iter().product()
    }

    /// Checks if the given vector is within the domain.
    pub fn contains(&self, p: &SVector<f64, N>) -> bool {
        p.iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(x, (l, h))| l <= x && x <= h)
    }

    /// Returns the size of each dimension as a vector.
    pub fn dimensions(&self) -> SVector<f64, N> {
        self.high - self.low
    }
}

impl<const N: usize> Hyperplane<N> {
    /// Constructs a hyperplane through @center whose normal is @direction.
    /// @direction does not need to be normalized.
    /// ## Error (Err)
    /// * InvalidInput : If @direction has zero (or non-finite) norm, the normal is
    ///   undefined.
    pub fn new(center: SVector<f64, N>, direction: SVector<f64, N>) -> Result<Self> {
        let normal = unit_direction(&direction)?;
        Ok(Hyperplane { center, normal })
    }

    /// The perpendicular bisector between samples @a and @b. The center is their
    /// midpoint and the normal points from @a toward @b.
    /// ## Error (Err)
    /// * InvalidInput : If @a and @b coincide.
    pub fn between(a: &SVector<f64, N>, b: &SVector<f64, N>) -> Result<Self> {
        let center = (a + b) / 2.0;
        Hyperplane::new(center, b - a)
    }

    pub fn center(&self) -> &SVector<f64, N> {
        &self.center
    }

    /// The unit normal of the hyperplane.
    pub fn normal(&self) -> &SVector<f64, N> {
        &self.normal
    }

    /// Distance from @p to the hyperplane, positive on the side @normal points to.
    pub fn signed_distance(&self, p: &SVector<f64, N>) -> f64 {
        (p - self.center).dot(&self.normal)
    }

    /// Checks if @p lies on the hyperplane within @atol.
    pub fn contains(&self, p: &SVector<f64, N>, atol: f64) -> bool {
        self.signed_distance(p).abs() <= atol
    }
}

/// Normalizes @v, failing when its direction is undefined.
pub(crate) fn unit_direction<const N: usize>(v: &SVector<f64, N>) -> Result<SVector<f64, N>> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(SamplingError::InvalidInput(format!(
            "Direction {} has no usable norm.",
            vector_to_string(v)
        )));
    }

    Ok(v / norm)
}

impl NeighborPair {
    pub fn new(first: usize, second: usize) -> Self {
        NeighborPair { first, second }
    }

    /// The same pair with the smaller index first. Two probes that bracket the
    /// boundary between the same two samples share an unordered pair regardless
    /// of which side they started on.
    pub fn unordered(&self) -> Self {
        if self.first <= self.second {
            *self
        } else {
            NeighborPair {
                first: self.second,
                second: self.first,
            }
        }
    }
}

impl Pairing {
    /// ## Panic
    /// When @first and @second differ in length.
    pub fn new(first: Vec<usize>, second: Vec<usize>) -> Self {
        assert_eq!(
            first.len(),
            second.len(),
            "Every probe needs both a first and second neighbor."
        );
        Pairing { first, second }
    }

    pub fn first(&self) -> &[usize] {
        &self.first
    }

    pub fn second(&self) -> &[usize] {
        &self.second
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn get(&self, probe: usize) -> Option<NeighborPair> {
        Some(NeighborPair::new(
            *self.first.get(probe)?,
            *self.second.get(probe)?,
        ))
    }

    pub fn iter(&self) -> impl Iterator<Item = NeighborPair> + '_ {
        self.first
            .iter()
            .zip(self.second.iter())
            .map(|(&f, &s)| NeighborPair::new(f, s))
    }
}

impl FromIterator<NeighborPair> for Pairing {
    fn from_iter<I: IntoIterator<Item = NeighborPair>>(iter: I) -> Self {
        let (first, second) = iter.into_iter().map(|p| (p.first, p.second)).unzip();
        Pairing { first, second }
    }
}

impl<const N: usize> fmt::Display for Hyperplane<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hyperplane(c: {}, n: {})",
            vector_to_string(&self.center),
            vector_to_string(&self.normal)
        )
    }
}

impl fmt::Display for NeighborPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[cfg(test)]
mod hyperplane_tests {
    use nalgebra::vector;

    use super::*;

    const ATOL: f64 = 1e-10;

    fn approx(a: f64, b: f64, atol: f64) -> bool {
        (a - b).abs() < atol
    }

    #[test]
    fn bisector_center_is_midpoint() {
        let a = vector![0.0, 0.0, 2.0];
        let b = vector![4.0, 2.0, 0.0];

        let plane = Hyperplane::between(&a, &b).expect("Distinct points");

        assert!((plane.center() - vector![2.0, 1.0, 1.0]).norm() < ATOL);
    }

    #[test]
    fn bisector_normal_is_unit_and_points_to_second() {
        let a = vector![1.0, 1.0];
        let b = vector![4.0, 5.0];

        let plane = Hyperplane::between(&a, &b).expect("Distinct points");

        assert!(approx(plane.normal().norm(), 1.0, ATOL));
        assert!(plane.signed_distance(&b) > 0.0);
        assert!(plane.signed_distance(&a) < 0.0);
        assert!(approx(plane.signed_distance(&b), 2.5, ATOL));
    }

    #[test]
    fn bisector_is_equidistant() {
        let a = vector![0.3, -1.2, 0.8, 2.0];
        let b = vector![1.1, 0.4, -0.7, 0.5];

        let plane = Hyperplane::between(&a, &b).expect("Distinct points");

        assert!(approx(
            plane.signed_distance(&a),
            -plane.signed_distance(&b),
            ATOL
        ));
    }

    #[test]
    fn coincident_points_are_invalid() {
        let a = vector![1.0, 2.0];

        let result = Hyperplane::between(&a, &a);

        assert!(matches!(result, Err(SamplingError::InvalidInput(_))));
    }

    #[test]
    fn contains_center() {
        let plane = Hyperplane::new(vector![1.0, 1.0], vector![0.0, 3.0]).expect("Nonzero");

        assert!(plane.contains(&vector![1.0, 1.0], ATOL));
        assert!(plane.contains(&vector![-7.0, 1.0], ATOL));
        assert!(!plane.contains(&vector![1.0, 1.1], ATOL));
    }
}


#[cfg(test)]
mod pairing_tests {
    use super::*;

    #[test]
    fn unordered_sorts_indices() {
        assert_eq!(NeighborPair::new(7, 2).unordered(), NeighborPair::new(2, 7));
        assert_eq!(NeighborPair::new(2, 7).unordered(), NeighborPair::new(2, 7));
    }

    #[test]
    fn collects_from_pairs() {
        let pairing: Pairing = vec![NeighborPair::new(0, 3), NeighborPair::new(1, 4)]
            .into_iter()
            .collect();

        assert_eq!(pairing.first(), &[0, 1]);
        assert_eq!(pairing.second(), &[3, 4]);
        assert_eq!(pairing.get(1), Some(NeighborPair::new(1, 4)));
        assert_eq!(pairing.get(2), None);
    }
}
