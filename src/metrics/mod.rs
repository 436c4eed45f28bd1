pub mod boundary_metrics;

pub use boundary_metrics::*;
