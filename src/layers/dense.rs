use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// One fully connected phenotype layer, built from a genome's layer genes.
/// Immutable after construction; activation needs no scratch state.
#[derive(Debug, Clone)]
pub struct Layer{
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    /// `weights` is `(input_size, size)`, `biases` has `size` entries.
    pub fn new(weights: Matrix, biases: &[f64], activation: ActivationFunction) -> Layer {
        Layer {
            size: weights.cols,
            biases: Matrix::row(biases),
            weights,
            activator: activation
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        let z = &(&Matrix::row(input) * &self.weights) + &self.biases;
        let a = z.map(|x| self.activator.function(x));
        a.data.into_iter().next().unwrap_or_default()
    }
}
