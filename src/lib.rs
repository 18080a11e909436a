pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod dataset;
pub mod evolution;
pub mod fitness;
pub mod run;
pub mod store;
pub mod inspect;
pub mod error;
pub mod logging;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use network::network::FeedForwardNetwork;
pub use dataset::{Dataset, Record, Species};
pub use evolution::{Activate, GenomeId, Individual, Optimizer};
pub use evolution::neat::{Genome, NeatConfig, Population};
pub use evolution::reporting::{GenerationStats, ProgressReporter, Reporter, ReporterSet, StatisticsReporter};
pub use fitness::{Baseline, FitnessEvaluator};
pub use run::{RunConfig, RunHarness, RunState};
pub use store::{ArtifactStore, GenomeArtifact};
pub use inspect::{ArtifactReport, EvaluationResult, Inspection, ResultViewer, CORRECTNESS_TOLERANCE};
pub use error::{Error, Result};

/// Artifact type written by the CLI and read by the viewer.
pub type NeatArtifact = GenomeArtifact<Genome, NeatConfig>;
