use serde::{Serialize, Deserialize};

use crate::dataset::Dataset;

/// The persisted result of a run: the winning genome together with the exact
/// configuration and dataset that produced it. Never modified after saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeArtifact<G, C> {
    pub genome: G,
    pub config: C,
    pub dataset: Dataset,
}

impl<G, C> GenomeArtifact<G, C> {
    pub fn new(genome: G, config: C, dataset: Dataset) -> Self {
        GenomeArtifact { genome, config, dataset }
    }
}

/// `g_{generations}_p_{population}_{timestamp}`.
pub fn default_artifact_name(max_generations: usize, population_size: usize, timestamp: u64) -> String {
    format!("g_{}_p_{}_{}", max_generations, population_size, timestamp)
}

/// `{name}_{timestamp}`.
pub fn custom_artifact_name(name: &str, timestamp: u64) -> String {
    format!("{}_{}", name, timestamp)
}

/// Seconds since the Unix epoch, used to keep artifact names apart.
pub fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
