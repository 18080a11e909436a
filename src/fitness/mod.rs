pub mod evaluator;

pub use evaluator::{Baseline, FitnessEvaluator};
