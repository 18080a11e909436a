use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::evolution::GenomeId;

/// Summary of one evaluated generation, handed to every reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// 0-based generation number.
    pub generation: usize,
    pub population_size: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub stdev_fitness: f64,
    pub best_genome: GenomeId,
    /// Wall-clock time spent evaluating this generation.
    pub elapsed_ms: u64,
}

impl GenerationStats {
    /// Computes mean and population standard deviation from the fitness
    /// values of one generation. `best` must be the fittest genome.
    pub fn from_fitnesses(
        generation: usize,
        fitnesses: &[f64],
        best: (GenomeId, f64),
        elapsed_ms: u64,
    ) -> Self {
        let n = fitnesses.len().max(1) as f64;
        let mean = fitnesses.iter().sum::<f64>() / n;
        let var = fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;
        GenerationStats {
            generation,
            population_size: fitnesses.len(),
            best_fitness: best.1,
            mean_fitness: mean,
            stdev_fitness: var.sqrt(),
            best_genome: best.0,
            elapsed_ms,
        }
    }
}

/// Progress hooks called by an optimizer during a run. All hooks default to
/// no-ops so reporters only implement what they care about.
///
/// A reporter is created for one run, attached to it, and dropped afterwards.
pub trait Reporter {
    fn start_generation(&mut self, _generation: usize) {}
    fn post_evaluate(&mut self, _stats: &GenerationStats) {}
    fn found_solution(&mut self, _generation: usize, _best_fitness: f64) {}
    fn end_generation(&mut self, _stats: &GenerationStats) {}
}

/// Fans every hook out to several reporters in insertion order.
#[derive(Default)]
pub struct ReporterSet<'a> {
    reporters: Vec<&'a mut dyn Reporter>,
}

impl<'a> ReporterSet<'a> {
    pub fn new() -> Self {
        ReporterSet { reporters: Vec::new() }
    }

    pub fn add(&mut self, reporter: &'a mut dyn Reporter) {
        self.reporters.push(reporter);
    }
}

impl Reporter for ReporterSet<'_> {
    fn start_generation(&mut self, generation: usize) {
        for r in &mut self.reporters {
            r.start_generation(generation);
        }
    }

    fn post_evaluate(&mut self, stats: &GenerationStats) {
        for r in &mut self.reporters {
            r.post_evaluate(stats);
        }
    }

    fn found_solution(&mut self, generation: usize, best_fitness: f64) {
        for r in &mut self.reporters {
            r.found_solution(generation, best_fitness);
        }
    }

    fn end_generation(&mut self, stats: &GenerationStats) {
        for r in &mut self.reporters {
            r.end_generation(stats);
        }
    }
}

/// Logs generation starts and the best fitness after each evaluation.
#[derive(Debug, Default)]
pub struct ProgressReporter;

impl Reporter for ProgressReporter {
    fn start_generation(&mut self, generation: usize) {
        info!("Starting generation {}", generation);
    }

    fn post_evaluate(&mut self, stats: &GenerationStats) {
        info!("Current best fitness: {}", stats.best_fitness);
        debug!(
            generation = stats.generation,
            mean = stats.mean_fitness,
            stdev = stats.stdev_fitness,
            best_genome = stats.best_genome,
            elapsed_ms = stats.elapsed_ms,
            "generation evaluated"
        );
    }

    fn found_solution(&mut self, generation: usize, best_fitness: f64) {
        info!(generation, best_fitness, "fitness threshold reached");
    }
}

/// Keeps the per-generation history of a run.
#[derive(Debug, Default)]
pub struct StatisticsReporter {
    pub history: Vec<GenerationStats>,
}

impl StatisticsReporter {
    pub fn new() -> Self {
        StatisticsReporter { history: Vec::new() }
    }

    pub fn generations(&self) -> usize {
        self.history.len()
    }

    pub fn best_fitness_curve(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.best_fitness).collect()
    }

    pub fn total_elapsed_ms(&self) -> u64 {
        self.history.iter().map(|s| s.elapsed_ms).sum()
    }
}

impl Reporter for StatisticsReporter {
    fn post_evaluate(&mut self, stats: &GenerationStats) {
        self.history.push(stats.clone());
    }
}
