use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::evolution::{GenomeId, Individual};
use crate::math::matrix::Matrix;
use super::config::NeatConfig;

/// Connection weights and node biases feeding one layer of nodes.
///
/// `weights` is `(input_size, size)`: row `i` holds the outgoing connections
/// of upstream node `i`, column `j` the incoming connections of node `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerGenes {
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

impl LayerGenes {
    fn random<R: Rng + ?Sized>(input_size: usize, size: usize, power: f64, rng: &mut R) -> Self {
        LayerGenes {
            weights: Matrix::random(input_size, size, power, rng),
            biases: (0..size).map(|_| (rng.gen::<f64>() * 2.0 - 1.0) * power).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.biases.len()
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }
}

/// A candidate network: a stack of dense layers whose hidden widths grow and
/// shrink under mutation. The last layer always has `num_outputs` nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub key: GenomeId,
    pub layers: Vec<LayerGenes>,
    pub fitness: Option<f64>,
}

impl Individual for Genome {
    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

impl Genome {
    /// A fresh genome with `config.initial_hidden` hidden nodes (or none).
    pub fn minimal<R: Rng + ?Sized>(key: GenomeId, config: &NeatConfig, rng: &mut R) -> Genome {
        let power = config.weight_init_power;
        let layers = if config.initial_hidden == 0 {
            vec![LayerGenes::random(config.num_inputs, config.num_outputs, power, rng)]
        } else {
            vec![
                LayerGenes::random(config.num_inputs, config.initial_hidden, power, rng),
                LayerGenes::random(config.initial_hidden, config.num_outputs, power, rng),
            ]
        };
        Genome { key, layers, fitness: None }
    }

    pub fn hidden_sizes(&self) -> Vec<usize> {
        let n = self.layers.len().saturating_sub(1);
        self.layers[..n].iter().map(LayerGenes::size).collect()
    }

    pub fn hidden_nodes(&self) -> usize {
        self.hidden_sizes().iter().sum()
    }

    /// Number of connection weights plus biases.
    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(|l| l.weights.rows * l.weights.cols + l.size()).sum()
    }

    /// Applies parameter and structural mutations in place and clears fitness.
    pub fn mutate<R: Rng + ?Sized>(&mut self, config: &NeatConfig, rng: &mut R) {
        self.mutate_parameters(config, rng);

        if rng.gen::<f64>() < config.node_add_prob && self.hidden_nodes() < config.max_hidden_nodes {
            self.add_node(config, rng);
        }
        if rng.gen::<f64>() < config.node_delete_prob {
            self.delete_node(rng);
        }
        self.fitness = None;
    }

    fn mutate_parameters<R: Rng + ?Sized>(&mut self, config: &NeatConfig, rng: &mut R) {
        let mut mutate_one = |w: f64| -> f64 {
            let r = rng.gen::<f64>();
            let v = if r < config.weight_replace_rate {
                (rng.gen::<f64>() * 2.0 - 1.0) * config.weight_init_power
            } else if r < config.weight_replace_rate + config.weight_mutate_rate {
                w + Matrix::sample_standard_normal(&mut *rng) * config.weight_mutate_power
            } else {
                w
            };
            v.clamp(-config.weight_bound, config.weight_bound)
        };

        for layer in &mut self.layers {
            layer.weights.map_inplace(&mut mutate_one);
            for b in &mut layer.biases {
                *b = mutate_one(*b);
            }
        }
    }

    /// Adds one hidden node. The new node gets random incoming weights and
    /// zero outgoing weights, so the network output is unchanged until later
    /// mutations pick it up. A genome without hidden layers gains its first
    /// one, with a single node.
    pub fn add_node<R: Rng + ?Sized>(&mut self, config: &NeatConfig, rng: &mut R) {
        let power = config.weight_init_power;

        if self.layers.len() == 1 {
            let inputs = self.layers[0].input_size();
            let outputs = self.layers[0].size();
            let hidden = LayerGenes::random(inputs, 1, power, rng);
            let out = LayerGenes { weights: Matrix::zeros(1, outputs), biases: self.layers[0].biases.clone() };
            self.layers = vec![hidden, out];
            return;
        }

        let h = rng.gen_range(0..self.layers.len() - 1);
        let layer = &mut self.layers[h];
        layer.weights.push_col(|_| (rng.gen::<f64>() * 2.0 - 1.0) * power);
        layer.biases.push(0.0);
        self.layers[h + 1].weights.push_row(|_| 0.0);
    }

    /// Removes one hidden node from a layer wider than one node. Does nothing
    /// when every hidden layer is down to a single node.
    pub fn delete_node<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let candidates: Vec<usize> = self.hidden_sizes().iter().enumerate()
            .filter(|&(_, &size)| size > 1)
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return;
        }

        let h = candidates[rng.gen_range(0..candidates.len())];
        let node = rng.gen_range(0..self.layers[h].size());
        self.layers[h].weights.remove_col(node);
        self.layers[h].biases.remove(node);
        self.layers[h + 1].weights.remove_row(node);
    }

    /// Breeds a child that keeps the structure of the fitter parent. Every
    /// gene that also exists in the other parent at the same layer and
    /// position is taken from either parent with equal chance.
    pub fn crossover<R: Rng + ?Sized>(key: GenomeId, a: &Genome, b: &Genome, rng: &mut R) -> Genome {
        let a_fit = a.fitness.unwrap_or(f64::NEG_INFINITY);
        let b_fit = b.fitness.unwrap_or(f64::NEG_INFINITY);
        let (fit, other) = if a_fit >= b_fit { (a, b) } else { (b, a) };

        let mut child = fit.clone();
        child.key = key;
        child.fitness = None;

        for (cl, ol) in child.layers.iter_mut().zip(other.layers.iter()) {
            let rows = cl.weights.rows.min(ol.weights.rows);
            let cols = cl.weights.cols.min(ol.weights.cols);
            for i in 0..rows {
                for j in 0..cols {
                    if rng.gen::<bool>() {
                        cl.weights.data[i][j] = ol.weights.data[i][j];
                    }
                }
            }
            for j in 0..cols {
                if rng.gen::<bool>() {
                    cl.biases[j] = ol.biases[j];
                }
            }
        }
        child
    }

    /// Checks that consecutive layers chain and match the configured
    /// input and output widths.
    pub fn check_structure(&self, config: &NeatConfig) -> std::result::Result<(), String> {
        let first = self.layers.first().ok_or("genome has no layers")?;
        if first.input_size() != config.num_inputs {
            return Err(format!("first layer takes {} inputs, config says {}", first.input_size(), config.num_inputs));
        }
        let last = self.layers.last().ok_or("genome has no layers")?;
        if last.size() != config.num_outputs {
            return Err(format!("last layer has {} nodes, config says {}", last.size(), config.num_outputs));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.weights.is_well_formed() || layer.weights.cols != layer.size() {
                return Err(format!("layer {} weights do not match its {} biases", i, layer.size()));
            }
            if i > 0 && layer.input_size() != self.layers[i - 1].size() {
                return Err(format!("layer {} takes {} inputs but layer {} has {} nodes",
                    i, layer.input_size(), i - 1, self.layers[i - 1].size()));
            }
        }
        Ok(())
    }
}
