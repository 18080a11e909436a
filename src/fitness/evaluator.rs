use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::evolution::{Activate, GenomeId, Individual, Optimizer};
use crate::loss::mae::MaeLoss;

/// Starting score from which every record's absolute error is subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// `records × output dimensions`: the largest total error possible when
    /// every output and target lies in `[0, 1]` (450 for the 150-row Iris
    /// set).
    Derived,
    /// A fixed constant, only meaningful for the dataset size it was chosen for.
    Fixed(f64),
}

impl Default for Baseline {
    fn default() -> Self {
        Baseline::Derived
    }
}

/// Scores genomes as `baseline - Σ_records Σ_outputs |expected - actual|`.
/// Higher is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessEvaluator {
    baseline: f64,
}

impl FitnessEvaluator {
    pub fn new(baseline: f64) -> Self {
        FitnessEvaluator { baseline }
    }

    pub fn for_dataset(dataset: &Dataset, baseline: Baseline) -> Self {
        match baseline {
            Baseline::Derived => FitnessEvaluator::new((dataset.len() * dataset.output_size()) as f64),
            Baseline::Fixed(value) => FitnessEvaluator::new(value),
        }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Runs every record through `network` and returns the fitness.
    /// A network whose output width differs from the record's is an error.
    pub fn score<N: Activate + ?Sized>(&self, dataset: &Dataset, network: &N) -> Result<f64> {
        let mut fitness = self.baseline;
        for (input, expected) in dataset.records_for_evaluation() {
            let actual = network.activate(input)?;
            if actual.len() != expected.len() {
                return Err(Error::OutputSize { expected: expected.len(), got: actual.len() });
            }
            fitness -= MaeLoss::total(&actual, expected);
        }
        Ok(fitness)
    }

    /// Scores `genome` through `network` and stores the result as its fitness.
    pub fn evaluate<G, N>(&self, genome: &mut G, dataset: &Dataset, network: &N) -> Result<f64>
    where
        G: Individual + ?Sized,
        N: Activate + ?Sized,
    {
        let fitness = self.score(dataset, network)?;
        genome.set_fitness(fitness);
        Ok(fitness)
    }

    /// Builds each genome's network with `O::build_network` and evaluates it.
    /// With `parallel`, genomes are spread over the rayon pool; either way
    /// this returns only once the whole population has been scored. The
    /// first failure is returned and the rest of the population is left as is.
    pub fn evaluate_population<O>(
        &self,
        genomes: &mut [(GenomeId, O::Genome)],
        config: &O::Config,
        dataset: &Dataset,
        parallel: bool,
    ) -> Result<()>
    where
        O: Optimizer,
        O::Genome: Send,
        O::Config: Sync,
    {
        let evaluate_one = |genome: &mut O::Genome| -> Result<()> {
            let network = O::build_network(genome, config)?;
            self.evaluate(genome, dataset, &network).map(|_| ())
        };

        if parallel {
            genomes.par_iter_mut().try_for_each(|(_, genome)| evaluate_one(genome))
        } else {
            genomes.iter_mut().try_for_each(|(_, genome)| evaluate_one(genome))
        }
    }
}
