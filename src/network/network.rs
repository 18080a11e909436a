use crate::evolution::neat::{Genome, NeatConfig};
use crate::evolution::Activate;
use crate::error::{Error, Result};
use crate::layers::dense::Layer;

/// Feed-forward phenotype of a [`Genome`]: hidden layers use
/// `config.hidden_activation`, the output layer `config.output_activation`.
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    pub layers: Vec<Layer>,
}

impl FeedForwardNetwork {
    /// Builds the network for `genome` under `config`. Fails with
    /// `MalformedGenome` when the genome's layers do not chain or do not fit
    /// the configured input/output widths.
    pub fn create(genome: &Genome, config: &NeatConfig) -> Result<FeedForwardNetwork> {
        genome.check_structure(config)
            .map_err(|reason| Error::MalformedGenome { genome: genome.key, reason })?;

        let last = genome.layers.len() - 1;
        let layers = genome.layers.iter().enumerate()
            .map(|(i, genes)| {
                let activation = if i == last {
                    config.output_activation.clone()
                } else {
                    config.hidden_activation.clone()
                };
                Layer::new(genes.weights.clone(), &genes.biases, activation)
            })
            .collect();
        Ok(FeedForwardNetwork { layers })
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Forward pass.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(Error::InputSize { expected: self.input_size(), got: input.len() });
        }
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.feed_from(&current);
        }
        Ok(current)
    }
}

impl Activate for FeedForwardNetwork {
    fn activate(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.forward(input)
    }
}
