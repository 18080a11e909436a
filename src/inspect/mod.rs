pub mod evaluation;
pub mod viewer;

pub use evaluation::{evaluate_records, is_correct, EvaluationResult, Inspection, CORRECTNESS_TOLERANCE};
pub use viewer::{ArtifactReport, ResultViewer};
