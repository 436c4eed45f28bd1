#![cfg(all(feature = "sps", feature = "metrics"))]

use dbsampler::{
    dbs,
    metrics::{mean_pair_deviation, mean_plane_deviation},
    relaxation::Relaxation,
    run, sample_boundary,
    sps::{split_by_plane, two_clusters},
    structs::{Dataset, Domain, Finder, Hyperplane, Projection, RelaxationConfig, SamplingError},
};
use nalgebra::{vector, SVector};

const ATOL: f64 = 1e-9;

fn separated_clusters() -> Dataset<2> {
    two_clusters(vector![0.0, 0.0], vector![10.0, 10.0], 0.5, 50, 17).expect("Valid clusters")
}

/// The perpendicular bisector of the two cluster centers, x + y = 10.
fn midline() -> Hyperplane<2> {
    Hyperplane::between(&vector![0.0, 0.0], &vector![10.0, 10.0]).expect("Distinct centers")
}

/// Two mirrored columns of samples, x = 0 labelled 0 and x = 10 labelled 1. Every
/// probe's pair is a mirrored couple, so the boundary is exactly x = 5.
fn mirrored_columns() -> Dataset<2> {
    let mut points = vec![];
    let mut labels = vec![];
    for x in [0.0, 10.0] {
        for i in 0..10 {
            points.push(vector![x, i as f64]);
            labels.push(if x == 0.0 { 0 } else { 1 });
        }
    }
    Dataset::new(points, labels).expect("Valid dataset")
}

#[test]
fn cover_has_requested_shape() {
    let dataset = separated_clusters();

    for n_points in [1, 20, 333] {
        let config = RelaxationConfig::default()
            .with_points(n_points)
            .with_seed(0);

        let cover = sample_boundary(&dataset, &config).expect("Valid run");

        assert_eq!(cover.len(), n_points);
    }
}

#[test]
fn dbs_uses_defaults() {
    let dataset = separated_clusters();

    let cover = dbs(dataset.points(), dataset.labels(), None, None).expect("Valid run");

    assert_eq!(cover.len(), 1000);
}

#[test]
fn clusters_relax_toward_midline() {
    let dataset = separated_clusters();
    let config = RelaxationConfig::default()
        .with_points(20)
        .with_epochs(5)
        .with_seed(23);
    let plane = midline();

    let mut relaxation = Relaxation::from_config(&dataset, &config).expect("Valid config");
    let initial = mean_plane_deviation(relaxation.cover(), &plane);

    let mut deviations = vec![];
    while let Some(summary) = relaxation.step().expect("Two labels") {
        let deviation = mean_plane_deviation(relaxation.cover(), &plane);
        println!("epoch {}: deviation {deviation}", summary.epoch);
        deviations.push(deviation);
    }

    assert_eq!(deviations.len(), 5);
    for deviation in &deviations {
        assert!(
            *deviation < initial,
            "Deviation {deviation} did not improve on the slate's {initial}"
        );
    }
    assert!(deviations[4] < initial / 2.0);
}

#[test]
fn mirrored_columns_converge_monotonically() {
    let dataset = mirrored_columns();
    let config = RelaxationConfig::default()
        .with_points(50)
        .with_epochs(5)
        .with_seed(31);
    let plane = Hyperplane::new(vector![5.0, 0.0], vector![1.0, 0.0]).expect("Nonzero");

    let mut relaxation = Relaxation::from_config(&dataset, &config).expect("Valid config");
    let mut previous = mean_plane_deviation(relaxation.cover(), &plane);
    assert!(previous > 1.0, "Slate was unexpectedly close to the boundary");

    let mut first_epoch = true;
    while relaxation.step().expect("Two labels").is_some() {
        let deviation = mean_plane_deviation(relaxation.cover(), &plane);
        if first_epoch {
            assert!(deviation < previous);
            first_epoch = false;
        } else {
            assert!(deviation <= previous + ATOL);
        }
        previous = deviation;
    }

    assert!(previous < ATOL, "Final deviation {previous} is off x = 5");
}

#[test]
fn probes_sit_on_their_pair_bisectors() {
    let dataset = separated_clusters();
    let config = RelaxationConfig::default()
        .with_points(100)
        .with_epochs(3)
        .with_seed(5);

    let mut relaxation = Relaxation::from_config(&dataset, &config).expect("Valid config");
    relaxation.run_to_end().expect("Two labels");

    let pairing = relaxation.pairing().expect("At least one epoch ran");
    let deviation =
        mean_pair_deviation(relaxation.cover(), pairing, &dataset).expect("Distinct pairs");

    assert!(deviation < ATOL);
}

#[test]
fn planar_boundary_is_recovered() {
    let plane = Hyperplane::new(vector![0.5, 0.5, 0.5], vector![1.0, 2.0, -1.0]).expect("Nonzero");
    let dataset = split_by_plane(Domain::normalized(), &plane, 2000, 12).expect("Valid split");
    let config = RelaxationConfig::default()
        .with_points(200)
        .with_seed(13);

    let mut relaxation = Relaxation::from_config(&dataset, &config).expect("Valid config");
    let initial = mean_plane_deviation(relaxation.cover(), &plane);
    relaxation.run_to_end().expect("Two labels");
    let deviation = mean_plane_deviation(relaxation.cover(), &plane);

    assert!(
        deviation < initial / 2.0,
        "Cover strayed {deviation} from the separating plane, slate was at {initial}"
    );
}

#[test]
fn same_seed_same_cover() {
    let dataset = separated_clusters();

    for (finder, projection) in [
        (Finder::DistanceMatrix, Projection::Qr),
        (Finder::Indexed, Projection::NullSpace),
    ] {
        let config = RelaxationConfig::default()
            .with_points(64)
            .with_finder(finder)
            .with_projection(projection)
            .with_seed(99);

        let a = sample_boundary(&dataset, &config).expect("Valid run");
        let b = sample_boundary(&dataset, &config).expect("Valid run");

        assert_eq!(a, b);
    }
}

#[test]
fn report_records_every_epoch() {
    let dataset = separated_clusters();
    let config = RelaxationConfig::default()
        .with_points(40)
        .with_epochs(4)
        .with_seed(6);

    let report = run(&dataset, &config).expect("Valid run");

    assert_eq!(report.epochs().len(), 4);
    assert_eq!(
        report.epochs().iter().map(|e| e.epoch).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(report.cover(), sample_boundary(&dataset, &config).expect("Valid run"));
}

#[test]
fn single_label_is_degenerate() {
    let points: Vec<SVector<f64, 2>> = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 0.5]];
    let labels = vec![3i64, 3, 3];

    let result = dbs(&points, &labels, Some(10), Some(2));

    assert!(matches!(
        result,
        Err(SamplingError::DegenerateBoundary { label: 3, .. })
    ));
}

#[test]
fn invalid_inputs_are_rejected() {
    let points: Vec<SVector<f64, 2>> = vec![vector![0.0, 0.0], vector![1.0, 1.0]];

    let empty = dbs::<2>(&[], &[], None, None);
    let mismatched = dbs(&points, &[0], None, None);
    let no_points = dbs(&points, &[0, 1], Some(0), None);
    let no_epochs = dbs(&points, &[0, 1], None, Some(0));

    for result in [empty, mismatched, no_points, no_epochs] {
        assert!(matches!(result, Err(SamplingError::InvalidInput(_))));
    }
}
