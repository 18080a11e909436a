//! Boundary between the run harness and an evolutionary optimizer.
//!
//! The harness only needs three capabilities from an optimizer: build a
//! population from a configuration, run generations with a caller-supplied
//! fitness callback, and turn a genome back into something that can be
//! activated. Anything implementing [`Optimizer`] can be driven by
//! [`crate::run::RunHarness`] and replayed by [`crate::inspect::ResultViewer`];
//! the bundled engine lives in [`neat`].

pub mod neat;
pub mod reporting;

use crate::error::Result;
use reporting::Reporter;

/// Identifier assigned to a genome by its optimizer.
pub type GenomeId = usize;

/// Forward activation of a built network.
pub trait Activate {
    fn activate(&self, input: &[f64]) -> Result<Vec<f64>>;
}

/// A candidate whose fitness the evaluator is responsible for setting.
pub trait Individual {
    fn fitness(&self) -> Option<f64>;
    fn set_fitness(&mut self, fitness: f64);
}

/// An evolutionary search engine.
pub trait Optimizer: Sized {
    type Config: Clone;
    type Genome: Individual + Clone;
    type Network: Activate;

    /// Builds the initial population. Population size is part of `config`.
    fn from_config(config: Self::Config) -> Result<Self>;

    /// Reconstructs the phenotype of `genome` under `config`.
    fn build_network(genome: &Self::Genome, config: &Self::Config) -> Result<Self::Network>;

    /// Runs up to `max_generations` generations, calling `evaluate` once per
    /// generation with the whole population, and returns the best genome
    /// seen. The optimizer may stop early under its own convergence rule.
    /// Any error from `evaluate` aborts the run.
    fn run<F>(
        &mut self,
        evaluate: F,
        max_generations: usize,
        reporter: &mut dyn Reporter,
    ) -> Result<Self::Genome>
    where
        F: FnMut(&mut [(GenomeId, Self::Genome)], &Self::Config) -> Result<()>;
}
