use crate::math::vector::abs_sum;

/// Sum of absolute output errors, the convergence measure used by training.
pub struct AbsSumLoss;

impl AbsSumLoss {
    /// Scalar loss: Σ|predicted - expected|
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| (p - y).abs())
            .sum()
    }

    /// Writes `predicted - expected` into `errors` and returns the scalar loss.
    /// All three slices must have the same length.
    pub fn errors_into(predicted: &[f64], expected: &[f64], errors: &mut [f64]) -> f64 {
        for ((e, p), y) in errors.iter_mut().zip(predicted.iter()).zip(expected.iter()) {
            *e = p - y;
        }
        abs_sum(errors)
    }
}
