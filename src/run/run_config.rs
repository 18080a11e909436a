use crate::error::{Error, Result};
use crate::fitness::Baseline;

/// Configuration for a `RunHarness` run.
///
/// # Fields
/// - `max_generations`: upper bound on generations; the optimizer may stop
///   earlier under its own convergence rule
/// - `baseline`: fitness baseline policy
/// - `parallel`: evaluate the genomes of one generation on the rayon pool
///   instead of one after another
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub max_generations: usize,
    pub baseline: Baseline,
    pub parallel: bool,
}

impl RunConfig {
    /// Sequential evaluation with a dataset-derived baseline.
    pub fn new(max_generations: usize) -> Self {
        RunConfig {
            max_generations,
            baseline: Baseline::Derived,
            parallel: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_generations == 0 {
            return Err(Error::InvalidConfig("max_generations must be at least 1".into()));
        }
        Ok(())
    }
}
