use serde::{de::DeserializeOwned, Serialize, Deserialize};
use std::marker::PhantomData;
use tracing::debug;

use crate::error::Result;
use crate::evolution::{Individual, Optimizer};
use crate::store::{ArtifactStore, GenomeArtifact};
use super::evaluation::{evaluate_records, Inspection};

/// Everything the viewer shows for one artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactReport<G> {
    pub name: String,
    pub source: String,
    pub fitness: Option<f64>,
    pub genome: G,
    pub inspection: Inspection,
}

/// Replays saved artifacts of optimizer `O` against their own datasets.
pub struct ResultViewer<O> {
    store: ArtifactStore,
    _optimizer: PhantomData<fn() -> O>,
}

impl<O> ResultViewer<O>
where
    O: Optimizer,
    O::Genome: DeserializeOwned,
    O::Config: DeserializeOwned,
{
    pub fn new(store: ArtifactStore) -> Self {
        ResultViewer { store, _optimizer: PhantomData }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Non-hidden regular files in the artifact directory, sorted.
    pub fn list_artifacts(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    /// Loads `name` as a full artifact.
    pub fn load(&self, name: &str) -> Result<GenomeArtifact<O::Genome, O::Config>> {
        self.store.load(name)
    }

    /// Rebuilds the stored network and runs the stored dataset through it.
    pub fn inspect(&self, name: &str) -> Result<ArtifactReport<O::Genome>> {
        let artifact = self.load(name)?;
        let network = O::build_network(&artifact.genome, &artifact.config)?;
        let inspection = evaluate_records(&artifact.dataset, &network)?;
        debug!(artifact = name, total = inspection.total, correct = inspection.correct, "artifact inspected");

        Ok(ArtifactReport {
            name: name.to_owned(),
            source: artifact.dataset.source.clone(),
            fitness: artifact.genome.fitness(),
            genome: artifact.genome,
            inspection,
        })
    }
}
