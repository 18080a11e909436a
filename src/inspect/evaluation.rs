use serde::{Serialize, Deserialize};

use crate::dataset::{Dataset, Species};
use crate::error::{Error, Result};
use crate::evolution::Activate;
use crate::loss::mae::MaeLoss;

/// A prediction counts as correct when its mean absolute error over the
/// output dimensions is at most this value (inclusive).
pub const CORRECTNESS_TOLERANCE: f64 = 0.25;

/// `true` iff the mean absolute error is `<= CORRECTNESS_TOLERANCE`.
/// Empty vectors are never correct.
pub fn is_correct(expected: &[f64], actual: &[f64]) -> bool {
    !expected.is_empty() && MaeLoss::loss(actual, expected) <= CORRECTNESS_TOLERANCE
}

/// How the network did on one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub index: usize,
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
    pub actual: Vec<f64>,
    pub mean_absolute_error: f64,
    pub is_correct: bool,
    pub expected_species: Option<Species>,
    pub predicted_species: Option<Species>,
}

/// Per-record results for one network over one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub results: Vec<EvaluationResult>,
    pub total: usize,
    pub correct: usize,
}

impl Inspection {
    /// Fraction of correct records in `[0, 1]`; 0 for an empty dataset.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Runs every record of `dataset` through `network`.
pub fn evaluate_records<N: Activate + ?Sized>(dataset: &Dataset, network: &N) -> Result<Inspection> {
    let mut results = Vec::with_capacity(dataset.len());

    for (index, (input, expected)) in dataset.records_for_evaluation().enumerate() {
        let actual = network.activate(input)?;
        if actual.len() != expected.len() {
            return Err(Error::OutputSize { expected: expected.len(), got: actual.len() });
        }
        results.push(EvaluationResult {
            index,
            input: input.to_vec(),
            expected: expected.to_vec(),
            mean_absolute_error: MaeLoss::loss(&actual, expected),
            is_correct: is_correct(expected, &actual),
            expected_species: Species::from_output(expected),
            predicted_species: Species::from_output(&actual),
            actual,
        });
    }

    let correct = results.iter().filter(|r| r.is_correct).count();
    Ok(Inspection { total: results.len(), correct, results })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let expected = [1.0, 0.0, 0.0];
        assert!(is_correct(&expected, &[0.25, 0.0, 0.0]));
        assert!(is_correct(&expected, &[0.5, 0.25, 0.0]));
        assert!(!is_correct(&expected, &[0.2, 0.0, 0.0]));
        assert!(is_correct(&expected, &expected));
    }

    #[test]
    fn all_zero_output_is_wrong_for_every_species() {
        for species in Species::ALL {
            assert!(!is_correct(&species.one_hot(), &[0.0, 0.0, 0.0]));
        }
    }

    #[test]
    fn empty_output_is_never_correct() {
        assert!(!is_correct(&[], &[]));
    }

    #[test]
    fn accuracy_of_empty_inspection() {
        let empty = Inspection { results: vec![], total: 0, correct: 0 };
        assert_eq!(empty.accuracy(), 0.0);
    }
}
