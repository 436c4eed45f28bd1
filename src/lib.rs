pub mod boundary_tools;
pub mod pairing;
pub mod prelude;
pub mod projector_core;
pub mod projectors;
pub mod relaxation;
pub mod search;
pub mod structs;
mod utils;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "sps")]
pub mod sps;

pub use relaxation::{dbs, run, sample_boundary};
