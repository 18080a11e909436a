/// Absolute-error measures between a network output and its expected vector.
/// Only the overlapping prefix of the two slices is compared; callers check
/// widths first.
pub struct MaeLoss;

impl MaeLoss {
    /// Sum of |predicted - expected| over all output dimensions.
    pub fn total(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| (p - y).abs())
            .sum::<f64>()
    }

    /// Mean of |predicted - expected|. NaN for empty slices.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        Self::total(predicted, expected) / expected.len() as f64
    }
}
