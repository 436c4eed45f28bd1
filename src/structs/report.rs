#[cfg(feature = "io")]
use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use nalgebra::SVector;
#[cfg(feature = "io")]
use serde::{Deserialize, Serialize};

use super::RelaxationConfig;

/// What happened to the cover during a single epoch.
#[cfg_attr(feature = "io", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochSummary {
    /// 1-based index of the epoch that just completed.
    pub epoch: usize,
    /// Mean distance each probe moved during the epoch.
    pub mean_displacement: f64,
    pub max_displacement: f64,
    /// Number of distinct unordered neighbor pairs the probes were matched to.
    pub distinct_pairs: usize,
}

/// The outcome of a relaxation run: the final cover, and how it got there.
#[cfg_attr(feature = "io", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationReport<const N: usize> {
    config: RelaxationConfig,
    cover: Vec<Vec<f64>>,
    epochs: Vec<EpochSummary>,
}

impl<const N: usize> RelaxationReport<N> {
    pub fn new(
        config: RelaxationConfig,
        cover: &[SVector<f64, N>],
        epochs: Vec<EpochSummary>,
    ) -> Self {
        RelaxationReport {
            config,
            cover: cover.iter().map(|p| p.iter().copied().collect()).collect(),
            epochs,
        }
    }

    pub fn config(&self) -> &RelaxationConfig {
        &self.config
    }

    pub fn epochs(&self) -> &[EpochSummary] {
        &self.epochs
    }

    /// The final cover as rows.
    pub fn cover_rows(&self) -> &[Vec<f64>] {
        &self.cover
    }

    /// The final cover as vectors.
    pub fn cover(&self) -> Vec<SVector<f64, N>> {
        self.cover
            .iter()
            .map(|p| SVector::from_column_slice(p))
            .collect()
    }
}

#[cfg(feature = "io")]
impl<const N: usize> RelaxationReport<N> {
    pub fn load(path: &str) -> io::Result<Self> {
        let f = File::open(path)?;
        let report: Self = serde_json::from_reader(f)?;

        if let Some(row) = report.cover.iter().find(|row| row.len() != N) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Cover row has {} features, expected {N}.", row.len()),
            ));
        }

        Ok(report)
    }

    pub fn save(&self, path: &str) -> io::Result<()> {
        let f = File::create(path)?;
        let mut writer = BufWriter::new(f);
        serde_json::to_writer(&mut writer, &self)?;
        writer.flush()?;
        Ok(())
    }
}
