use nalgebra::SVector;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    boundary_tools::{distill, distinct_pairs},
    pairing::{separators, PairFinder},
    projector_core::HyperplaneProjector,
    search::{SlateGenerator, UniformSlate},
    structs::{
        Dataset, EpochSummary, Hyperplane, Label, Pairing, RelaxationConfig, RelaxationReport,
        Result, SamplingError, DEFAULT_N_EPOCHS, DEFAULT_N_POINTS,
    },
};

/// Relaxes a cover of probes onto the decision boundary of a labelled dataset.
///
/// Each epoch pairs every probe with its nearest sample and its nearest sample of
/// another label, then moves the probe onto the perpendicular bisector of that
/// pair. All probes of an epoch are computed from the cover as it was at the
/// start of the epoch; the new cover replaces the old one only once every probe
/// has been projected.
pub struct Relaxation<'a, const N: usize> {
    dataset: &'a Dataset<N>,
    finder: Box<dyn PairFinder<N> + 'a>,
    projector: Box<dyn HyperplaneProjector<N>>,
    cover: Vec<SVector<f64, N>>,
    pairing: Option<Pairing>,
    epoch: usize,
    n_epochs: usize,
}

impl<'a, const N: usize> Relaxation<'a, N> {
    /// Creates a Relaxation instance.
    /// ## Arguments
    /// * dataset : The labelled samples whose boundary is being approximated.
    /// * slate : The initial cover.
    /// * finder : Locates each probe's first and second neighbors.
    /// * projector : Moves each probe onto its separating hyperplane.
    /// * n_epochs : The number of epochs to run. There is no early stopping.
    /// ## Error (Err)
    /// * InvalidInput : If @slate is empty or @n_epochs is 0.
    /// * DegenerateBoundary : If @dataset has a single label.
    pub fn new(
        dataset: &'a Dataset<N>,
        slate: Vec<SVector<f64, N>>,
        finder: Box<dyn PairFinder<N> + 'a>,
        projector: Box<dyn HyperplaneProjector<N>>,
        n_epochs: usize,
    ) -> Result<Self> {
        if slate.is_empty() {
            return Err(SamplingError::InvalidInput(
                "The initial cover must contain at least one probe.".to_string(),
            ));
        }
        if n_epochs == 0 {
            return Err(SamplingError::InvalidInput(
                "n_epochs must be at least 1.".to_string(),
            ));
        }
        dataset.ensure_separable()?;

        Ok(Relaxation {
            dataset,
            finder,
            projector,
            cover: slate,
            pairing: None,
            epoch: 0,
            n_epochs,
        })
    }

    /// Creates a Relaxation whose slate, finder and projector are all described
    /// by @config.
    pub fn from_config(dataset: &'a Dataset<N>, config: &RelaxationConfig) -> Result<Self> {
        config.validate()?;
        dataset.ensure_separable()?;

        let domain = dataset.domain()?;
        let mut slate = match config.seed {
            Some(seed) => UniformSlate::from_seed(domain, seed),
            None => UniformSlate::from_entropy(domain),
        };

        let finder = config.finder.build(dataset);
        let projector = config.projection.build();

        log::info!(
            "relaxing {} probes over {} epochs against {} samples ({} finder, {} projector)",
            config.n_points,
            config.n_epochs,
            dataset.len(),
            finder.name(),
            projector.name()
        );

        Relaxation::new(
            dataset,
            slate.take(config.n_points),
            finder,
            projector,
            config.n_epochs,
        )
    }

    /// Runs a single epoch.
    /// ## Return (Ok)
    /// * Some(summary) : The epoch completed and the cover was replaced.
    /// * None : All epochs have already run, the cover is unchanged.
    /// ## Error (Err)
    /// Any error aborts the epoch without touching the cover.
    pub fn step(&mut self) -> Result<Option<EpochSummary>> {
        if self.is_done() {
            return Ok(None);
        }

        let pairing = self.finder.find_pairs(&self.cover)?;
        let planes = separators(&pairing, self.dataset)?;
        let projected = project_cover(&*self.projector, &self.cover, &planes)?;

        let displacements: Vec<f64> = self
            .cover
            .iter()
            .zip(projected.iter())
            .map(|(a, b)| (b - a).norm())
            .collect();

        let summary = EpochSummary {
            epoch: self.epoch + 1,
            mean_displacement: displacements.iter().sum::<f64>() / displacements.len() as f64,
            max_displacement: displacements.iter().copied().fold(0.0, f64::max),
            distinct_pairs: distinct_pairs(&pairing),
        };

        log::debug!(
            "epoch {}/{}: mean displacement {:.6}, max displacement {:.6}, {} distinct pairs",
            summary.epoch,
            self.n_epochs,
            summary.mean_displacement,
            summary.max_displacement,
            summary.distinct_pairs
        );
        if summary.distinct_pairs == 1 && self.cover.len() > 1 {
            log::warn!(
                "every probe collapsed onto a single neighbor pair in epoch {}",
                summary.epoch
            );
        }

        self.cover = projected;
        self.pairing = Some(pairing);
        self.epoch += 1;

        Ok(Some(summary))
    }

    /// Runs every remaining epoch, returning their summaries in order.
    pub fn run_to_end(&mut self) -> Result<Vec<EpochSummary>> {
        let mut summaries = vec![];
        while let Some(summary) = self.step()? {
            summaries.push(summary);
        }
        Ok(summaries)
    }

    pub fn cover(&self) -> &[SVector<f64, N>] {
        &self.cover
    }

    /// The pairing the current cover was projected with, None before the first
    /// epoch.
    pub fn pairing(&self) -> Option<&Pairing> {
        self.pairing.as_ref()
    }

    /// The number of completed epochs.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }

    pub fn is_done(&self) -> bool {
        self.epoch >= self.n_epochs
    }

    /// The current cover, thinned to one probe per distinct neighbor pair. Before
    /// the first epoch there is no pairing and the full cover is returned.
    pub fn distilled_cover(&self) -> Vec<SVector<f64, N>> {
        match &self.pairing {
            Some(pairing) => distill(&self.cover, pairing),
            None => self.cover.clone(),
        }
    }

    pub fn into_cover(self) -> Vec<SVector<f64, N>> {
        self.cover
    }
}

/// Projects every probe onto its own hyperplane.
fn project_cover<const N: usize>(
    projector: &dyn HyperplaneProjector<N>,
    cover: &[SVector<f64, N>],
    planes: &[Hyperplane<N>],
) -> Result<Vec<SVector<f64, N>>> {
    #[cfg(feature = "parallel")]
    let projected = cover
        .par_iter()
        .zip(planes.par_iter())
        .map(|(p, plane)| projector.project_onto(p, plane))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let projected = cover
        .iter()
        .zip(planes.iter())
        .map(|(p, plane)| projector.project_onto(p, plane))
        .collect();

    projected
}

fn final_cover<const N: usize>(relaxation: Relaxation<'_, N>, distill: bool) -> Vec<SVector<f64, N>> {
    let cover = if distill {
        relaxation.distilled_cover()
    } else {
        relaxation.into_cover()
    };

    log::info!("relaxation finished with {} probes", cover.len());
    cover
}

/// Runs a full relaxation described by @config and records every epoch.
/// ## Error (Err)
/// * InvalidInput : For invalid parameters, or when a probe's neighbors share
///   coordinates.
/// * DegenerateBoundary : If @dataset has a single label.
pub fn run<const N: usize>(
    dataset: &Dataset<N>,
    config: &RelaxationConfig,
) -> Result<RelaxationReport<N>> {
    let mut relaxation = Relaxation::from_config(dataset, config)?;
    let epochs = relaxation.run_to_end()?;

    let cover = final_cover(relaxation, config.distill);

    Ok(RelaxationReport::new(config.clone(), &cover, epochs))
}

/// Samples points along the decision boundary of @dataset.
/// ## Return (Ok)
/// * cover : The relaxed probes, @config.n_points of them unless
///   @config.distill is set.
pub fn sample_boundary<const N: usize>(
    dataset: &Dataset<N>,
    config: &RelaxationConfig,
) -> Result<Vec<SVector<f64, N>>> {
    let mut relaxation = Relaxation::from_config(dataset, config)?;
    relaxation.run_to_end()?;

    Ok(final_cover(relaxation, config.distill))
}

/// Samples the decision boundary between the classes of @x labelled by @y.
/// @n_points defaults to 1000 and @n_epochs to 5.
/// ## Error (Err)
/// * InvalidInput : If @x is empty, @x and @y differ in length, or either count
///   is 0.
/// * DegenerateBoundary : If @y holds a single label.
pub fn dbs<const N: usize>(
    x: &[SVector<f64, N>],
    y: &[Label],
    n_points: Option<usize>,
    n_epochs: Option<usize>,
) -> Result<Vec<SVector<f64, N>>> {
    let dataset = Dataset::new(x.to_vec(), y.to_vec())?;
    let config = RelaxationConfig::default()
        .with_points(n_points.unwrap_or(DEFAULT_N_POINTS))
        .with_epochs(n_epochs.unwrap_or(DEFAULT_N_EPOCHS));

    sample_boundary(&dataset, &config)
}

#[cfg(test)]
mod relaxation_tests {
    use nalgebra::vector;

    use super::*;
    use crate::{
        pairing::DistanceMatrixFinder,
        projectors::QrProjector,
        structs::{Finder, Projection},
    };

    fn four_corners() -> Dataset<2> {
        Dataset::new(
            vec![
                vector![0.0, 0.0],
                vector![0.0, 1.0],
                vector![2.0, 0.0],
                vector![2.0, 1.0],
            ],
            vec![0, 0, 1, 1],
        )
        .expect("Valid dataset")
    }

    #[test]
    fn single_epoch_lands_on_bisector() {
        let dataset = four_corners();
        let slate = vec![vector![0.2, 0.1], vector![1.9, 0.8]];
        let mut relaxation = Relaxation::new(
            &dataset,
            slate,
            Box::new(DistanceMatrixFinder::new(&dataset)),
            Box::new(QrProjector),
            1,
        )
        .expect("Valid relaxation");

        let summary = relaxation.step().expect("Two labels").expect("One epoch");

        assert_eq!(summary.epoch, 1);
        assert_eq!(summary.distinct_pairs, 2);
        for p in relaxation.cover() {
            assert!((p[0] - 1.0).abs() < 1e-10, "Probe {p} not on x = 1");
        }
        assert!((relaxation.cover()[0][1] - 0.1).abs() < 1e-10);
        assert!((relaxation.cover()[1][1] - 0.8).abs() < 1e-10);
    }

    #[test]
    fn step_returns_none_when_done() {
        let dataset = four_corners();
        let config = RelaxationConfig::default()
            .with_points(5)
            .with_epochs(2)
            .with_seed(1);
        let mut relaxation = Relaxation::from_config(&dataset, &config).expect("Valid config");

        assert!(relaxation.step().expect("Epoch 1").is_some());
        assert!(relaxation.step().expect("Epoch 2").is_some());
        let cover = relaxation.cover().to_vec();

        assert!(relaxation.is_done());
        assert_eq!(relaxation.step(), Ok(None));
        assert_eq!(relaxation.cover(), cover.as_slice());
        assert_eq!(relaxation.epoch(), 2);
    }

    #[test]
    fn empty_slate_is_invalid() {
        let dataset = four_corners();

        let result = Relaxation::new(
            &dataset,
            vec![],
            Box::new(DistanceMatrixFinder::new(&dataset)),
            Box::new(QrProjector),
            1,
        );

        assert!(matches!(result, Err(SamplingError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_sample_across_labels_is_invalid() {
        let dataset = Dataset::new(vec![vector![1.0, 1.0], vector![1.0, 1.0]], vec![0, 1])
            .expect("Valid dataset");
        let config = RelaxationConfig::default().with_points(3).with_seed(2);

        let result = sample_boundary(&dataset, &config);

        assert!(matches!(result, Err(SamplingError::InvalidInput(_))));
    }

    #[test]
    fn every_strategy_agrees() {
        let dataset = four_corners();
        let base = RelaxationConfig::default()
            .with_points(30)
            .with_epochs(3)
            .with_seed(8);

        let reference = sample_boundary(&dataset, &base).expect("Valid run");

        for (finder, projection) in [
            (Finder::Indexed, Projection::Qr),
            (Finder::DistanceMatrix, Projection::NullSpace),
            (Finder::DistanceMatrix, Projection::Rejection),
        ] {
            let config = base.clone().with_finder(finder).with_projection(projection);
            let cover = sample_boundary(&dataset, &config).expect("Valid run");

            for (a, b) in reference.iter().zip(cover.iter()) {
                assert!(
                    (a - b).norm() < 1e-8,
                    "{finder:?}/{projection:?} diverged: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn distill_keeps_one_probe_per_pair() {
        let dataset = four_corners();
        let config = RelaxationConfig::default()
            .with_points(200)
            .with_epochs(2)
            .with_seed(4)
            .with_distill(true);

        let report = run(&dataset, &config).expect("Valid run");

        let last = report.epochs().last().expect("Two epochs");
        assert_eq!(report.cover_rows().len(), last.distinct_pairs);
        assert!(report.cover_rows().len() < 200);
    }
}
