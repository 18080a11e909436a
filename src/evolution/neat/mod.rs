//! Bundled NEAT-style engine: genomes are stacks of dense layers whose hidden
//! widths evolve along with their weights.

pub mod config;
pub mod genome;
pub mod population;

pub use config::NeatConfig;
pub use genome::{Genome, LayerGenes};
pub use population::Population;
