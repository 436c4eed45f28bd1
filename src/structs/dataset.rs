use std::collections::BTreeMap;

use nalgebra::SVector;

use super::{Domain, Label, Result, SamplingError};

/// The sample indices belonging to each distinct label, computed once per
/// dataset so that every epoch can exclude a probe's own class without
/// rescanning the labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelGroups {
    groups: BTreeMap<Label, Vec<usize>>,
}

/// A labelled dataset: the feature matrix X, one row per sample, and the label
/// vector y. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<const N: usize> {
    points: Vec<SVector<f64, N>>,
    labels: Vec<Label>,
    groups: LabelGroups,
}

impl LabelGroups {
    pub fn new(labels: &[Label]) -> Self {
        let mut groups: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
        for (i, &label) in labels.iter().enumerate() {
            groups.entry(label).or_default().push(i);
        }

        LabelGroups { groups }
    }

    /// The distinct labels, in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.groups.keys().copied()
    }

    /// The sample indices carrying @label, in ascending order.
    pub fn members(&self, label: Label) -> &[usize] {
        self.groups.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether a sample labelled @label has at least one differently labelled
    /// sample to pair with.
    pub fn has_complement(&self, label: Label) -> bool {
        self.groups.keys().any(|&other| other != label)
    }
}

impl<const N: usize> Dataset<N> {
    /// Builds a dataset from samples and their labels.
    /// ## Error (Err)
    /// * InvalidInput : If there are no samples, N is 0, the number of labels does
    ///   not match the number of samples, or any coordinate is not finite.
    pub fn new(points: Vec<SVector<f64, N>>, labels: Vec<Label>) -> Result<Self> {
        if N == 0 {
            return Err(SamplingError::InvalidInput(
                "Samples must have at least one feature.".to_string(),
            ));
        }

        if points.is_empty() {
            return Err(SamplingError::InvalidInput("Dataset is empty.".to_string()));
        }

        if points.len() != labels.len() {
            return Err(SamplingError::InvalidInput(format!(
                "Got {} samples but {} labels.",
                points.len(),
                labels.len()
            )));
        }

        if let Some(i) = points.iter().position(|p| p.iter().any(|x| !x.is_finite())) {
            return Err(SamplingError::InvalidInput(format!(
                "Sample {i} has a non-finite coordinate."
            )));
        }

        let groups = LabelGroups::new(&labels);

        Ok(Dataset {
            points,
            labels,
            groups,
        })
    }

    /// Builds a dataset from row-oriented data, e.g. data that was loaded at
    /// runtime.
    /// ## Error (Err)
    /// * InvalidInput : If any row does not have exactly N features, or for any
    ///   reason listed in Dataset::new.
    pub fn from_rows(rows: &[Vec<f64>], labels: &[Label]) -> Result<Self> {
        let points = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() == N {
                    Ok(SVector::from_column_slice(row))
                } else {
                    Err(SamplingError::InvalidInput(format!(
                        "Row {i} has {} features, expected {N}.",
                        row.len()
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Dataset::new(points, labels.to_vec())
    }

    /// The samples, X.
    pub fn points(&self) -> &[SVector<f64, N>] {
        &self.points
    }

    /// The labels, y.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn groups(&self) -> &LabelGroups {
        &self.groups
    }

    pub fn point(&self, i: usize) -> &SVector<f64, N> {
        &self.points[i]
    }

    pub fn label(&self, i: usize) -> Label {
        self.labels[i]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a dataset can't be constructed without samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The bounding box of the samples.
    pub fn domain(&self) -> Result<Domain<N>> {
        Domain::new_from_point_cloud(&self.points)
    }

    /// Checks that at least two distinct labels are present, otherwise no probe
    /// can ever be paired.
    /// ## Error (Err)
    /// * DegenerateBoundary : If every sample carries the same label.
    pub fn ensure_separable(&self) -> Result<()> {
        let label = self.labels[0];
        if self.groups.has_complement(label) {
            Ok(())
        } else {
            Err(SamplingError::DegenerateBoundary { probe: 0, label })
        }
    }
}
