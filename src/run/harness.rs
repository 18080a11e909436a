use std::marker::PhantomData;
use tracing::{error, info};

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::evolution::reporting::{GenerationStats, Reporter};
use crate::evolution::{Individual, Optimizer};
use crate::fitness::FitnessEvaluator;
use crate::run::run_config::RunConfig;

/// Lifecycle of a harness. A harness runs at most once.
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    Idle,
    /// Set while the optimizer is working; `generation` is the one being
    /// evaluated.
    Running { generation: usize },
    Complete { generations: usize, best_fitness: Option<f64> },
    /// An evaluation error aborted the run. Runs are never retried.
    Failed { generation: usize, reason: String },
}

/// Drives one evolutionary run: owns the dataset, builds the optimizer's
/// population from `config`, scores every genome of every generation with
/// [`FitnessEvaluator`] and returns the best genome found.
pub struct RunHarness<O: Optimizer> {
    dataset: Dataset,
    config: O::Config,
    run_config: RunConfig,
    evaluator: FitnessEvaluator,
    state: RunState,
    _optimizer: PhantomData<O>,
}

/// Mirrors the optimizer's progress into the harness state, then forwards
/// to the caller's reporter.
struct Tracker<'a> {
    inner: &'a mut dyn Reporter,
    state: &'a mut RunState,
    evaluated: usize,
}

impl Tracker<'_> {
    fn generation(&self) -> usize {
        match *self.state {
            RunState::Running { generation } => generation,
            _ => 0,
        }
    }
}

impl Reporter for Tracker<'_> {
    fn start_generation(&mut self, generation: usize) {
        *self.state = RunState::Running { generation };
        self.inner.start_generation(generation);
    }

    fn post_evaluate(&mut self, stats: &GenerationStats) {
        self.evaluated += 1;
        self.inner.post_evaluate(stats);
    }

    fn found_solution(&mut self, generation: usize, best_fitness: f64) {
        self.inner.found_solution(generation, best_fitness);
    }

    fn end_generation(&mut self, stats: &GenerationStats) {
        self.inner.end_generation(stats);
    }
}

impl<O> RunHarness<O>
where
    O: Optimizer,
    O::Genome: Send,
    O::Config: Sync,
{
    pub fn new(dataset: Dataset, config: O::Config, run_config: RunConfig) -> Self {
        let evaluator = FitnessEvaluator::for_dataset(&dataset, run_config.baseline);
        RunHarness {
            dataset,
            config,
            run_config,
            evaluator,
            state: RunState::Idle,
            _optimizer: PhantomData,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &O::Config {
        &self.config
    }

    /// Runs the search to completion. `reporter` is attached for this run
    /// only. Any evaluation error is fatal: the run stops, the state becomes
    /// `Failed` and the error is returned.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> Result<O::Genome> {
        if self.state != RunState::Idle {
            return Err(Error::HarnessNotIdle);
        }
        self.run_config.validate()?;

        let mut population = O::from_config(self.config.clone())?;
        self.state = RunState::Running { generation: 0 };
        info!(
            records = self.dataset.len(),
            max_generations = self.run_config.max_generations,
            baseline = self.evaluator.baseline(),
            parallel = self.run_config.parallel,
            "starting run"
        );

        let evaluator = self.evaluator;
        let dataset = &self.dataset;
        let parallel = self.run_config.parallel;
        let mut tracker = Tracker { inner: reporter, state: &mut self.state, evaluated: 0 };

        let result = population.run(
            |genomes, config| evaluator.evaluate_population::<O>(genomes, config, dataset, parallel),
            self.run_config.max_generations,
            &mut tracker,
        );
        let (generation, evaluated) = (tracker.generation(), tracker.evaluated);

        match result {
            Ok(best) => {
                self.state = RunState::Complete {
                    generations: evaluated,
                    best_fitness: best.fitness(),
                };
                Ok(best)
            }
            Err(e) => {
                error!(generation, error = %e, "run aborted");
                self.state = RunState::Failed { generation, reason: e.to_string() };
                Err(e)
            }
        }
    }
}
