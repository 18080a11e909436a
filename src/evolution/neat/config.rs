use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};

/// Everything the bundled engine needs to build, mutate and select genomes.
///
/// Saved verbatim inside every artifact so a stored genome is always replayed
/// with the exact settings that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeatConfig {
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub pop_size: usize,

    /// Stop as soon as the best fitness of a generation reaches this value.
    pub fitness_threshold: f64,
    /// Ignore `fitness_threshold` and always run every generation.
    pub no_fitness_termination: bool,

    /// Width of the hidden layer of a fresh genome; `0` wires inputs
    /// straight to outputs.
    pub initial_hidden: usize,
    pub hidden_activation: ActivationFunction,
    pub output_activation: ActivationFunction,

    /// Initial weights and biases are uniform in `[-weight_init_power, weight_init_power)`.
    pub weight_init_power: f64,
    pub weight_mutate_rate: f64,
    /// Standard deviation of a Gaussian weight perturbation.
    pub weight_mutate_power: f64,
    pub weight_replace_rate: f64,
    /// Weights and biases are clamped to `[-weight_bound, weight_bound]`.
    pub weight_bound: f64,

    pub node_add_prob: f64,
    pub node_delete_prob: f64,
    pub max_hidden_nodes: usize,

    /// Chance that a child is bred from two parents instead of cloned from one.
    pub crossover_rate: f64,
    /// Number of top genomes copied unchanged into the next generation.
    pub elitism: usize,
    /// Fraction of each generation allowed to reproduce.
    pub survival_threshold: f64,

    /// Seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NeatConfig {
    fn default() -> Self {
        NeatConfig {
            num_inputs: 4,
            num_outputs: 3,
            pop_size: 150,
            fitness_threshold: 445.0,
            no_fitness_termination: false,
            initial_hidden: 3,
            hidden_activation: ActivationFunction::Tanh,
            output_activation: ActivationFunction::Sigmoid,
            weight_init_power: 1.0,
            weight_mutate_rate: 0.8,
            weight_mutate_power: 0.5,
            weight_replace_rate: 0.1,
            weight_bound: 30.0,
            node_add_prob: 0.2,
            node_delete_prob: 0.1,
            max_hidden_nodes: 24,
            crossover_rate: 0.5,
            elitism: 2,
            survival_threshold: 0.2,
            seed: None,
        }
    }
}

impl NeatConfig {
    /// Reads a config from a JSON file. Missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<NeatConfig> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = std::io::BufReader::new(file);
        let config: NeatConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with `pop_size` replaced.
    pub fn with_pop_size(mut self, pop_size: usize) -> NeatConfig {
        self.pop_size = pop_size;
        self
    }

    /// Rejects settings that would make the engine misbehave.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::InvalidConfig(msg));

        if self.num_inputs == 0 || self.num_outputs == 0 {
            return fail("num_inputs and num_outputs must be at least 1".into());
        }
        if self.pop_size == 0 {
            return fail("pop_size must be at least 1".into());
        }
        if self.elitism > self.pop_size {
            return fail(format!("elitism {} exceeds pop_size {}", self.elitism, self.pop_size));
        }
        if !(self.survival_threshold > 0.0 && self.survival_threshold <= 1.0) {
            return fail(format!("survival_threshold {} not in (0, 1]", self.survival_threshold));
        }
        for (name, p) in [
            ("weight_mutate_rate", self.weight_mutate_rate),
            ("weight_replace_rate", self.weight_replace_rate),
            ("node_add_prob", self.node_add_prob),
            ("node_delete_prob", self.node_delete_prob),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return fail(format!("{} {} not in [0, 1]", name, p));
            }
        }
        if !(self.weight_bound > 0.0) || !(self.weight_init_power > 0.0) {
            return fail("weight_bound and weight_init_power must be positive".into());
        }
        if self.initial_hidden > self.max_hidden_nodes {
            return fail(format!(
                "initial_hidden {} exceeds max_hidden_nodes {}",
                self.initial_hidden, self.max_hidden_nodes
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        NeatConfig::default().validate().expect("default config validates");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: NeatConfig = serde_json::from_str(r#"{ "pop_size": 20, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.pop_size, 20);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.num_outputs, 3);
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = NeatConfig::default().with_pop_size(0);
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));

        let cfg = NeatConfig { survival_threshold: 0.0, ..NeatConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = NeatConfig { elitism: 10, ..NeatConfig::default().with_pop_size(5) };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn json_file_roundtrip() {
        let dir = tempfile::tempdir().expect("test: create tempdir");
        let path = dir.path().join("neat.json");
        let cfg = NeatConfig { seed: Some(3), ..NeatConfig::default() };
        let json = serde_json::to_string_pretty(&cfg).expect("test: serialize");
        std::fs::write(&path, json).expect("test: write");
        assert_eq!(NeatConfig::load_json(&path).expect("test: load"), cfg);
    }
}
