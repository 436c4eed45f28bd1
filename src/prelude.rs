pub use crate::boundary_tools::{distill, distinct_pairs};
pub use crate::pairing::{find_pairs, separators, DistanceMatrixFinder, IndexedFinder, PairFinder};
pub use crate::projector_core::HyperplaneProjector;
pub use crate::projectors::{NullSpaceProjector, QrProjector, RejectionProjector};
pub use crate::relaxation::{dbs, run, sample_boundary, Relaxation};
pub use crate::search::{make_slate, SlateGenerator, UniformSlate};
pub use crate::structs::{
    Dataset, Domain, EpochSummary, Finder, Hyperplane, Label, LabelGroups, NeighborPair, Pairing,
    Projection, RelaxationConfig, RelaxationReport, Result, SamplingError,
};
