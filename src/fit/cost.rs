//! Half mean squared error cost.
//!
//! ```text
//! J(θ) = 1/(2n) · Σᵢ (x_aug,i · θ - yᵢ)²
//! ```
//!
//! The one-half factor cancels the 2 from differentiating the square, so the
//! gradient is `1/n · X_augᵀ (X_aug θ - y)`.

use nalgebra::DVector;

use crate::domain::Parameters;
use crate::error::{RegressionError, RegressionResult};
use crate::models::AugmentedDesign;

/// Cost of `params` on the augmented design.
pub fn cost(design: &AugmentedDesign, targets: &DVector<f64>, params: &Parameters) -> RegressionResult<f64> {
    let predictions = design.predict(params)?;
    cost_from_predictions(&predictions, targets)
}

/// Cost of precomputed predictions.
///
/// `cost` goes through this function, so feeding it the output of
/// `AugmentedDesign::predict` gives exactly the same value.
pub fn cost_from_predictions(predictions: &DVector<f64>, targets: &DVector<f64>) -> RegressionResult<f64> {
    if predictions.len() != targets.len() {
        return Err(RegressionError::DimensionMismatch {
            what: "target vector",
            expected: predictions.len(),
            found: targets.len(),
        });
    }
    if targets.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }
    let n = targets.len() as f64;
    Ok(sum_squared_residuals(predictions, targets) / (2.0 * n))
}

/// `Σᵢ (predictionᵢ - yᵢ)²`.
pub fn sum_squared_residuals(predictions: &DVector<f64>, targets: &DVector<f64>) -> f64 {
    predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, y)| {
            let r = p - y;
            r * r
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dataset;

    #[test]
    fn cost_of_exact_line_is_zero() {
        let ds = Dataset::from_rows(&["x"], &[vec![0.0], vec![1.0], vec![2.0]], &[1.0, 3.0, 5.0]).unwrap();
        let design = AugmentedDesign::from_dataset(&ds);
        let c = cost(&design, ds.targets(), &Parameters::from_slice(&[1.0, 2.0])).unwrap();
        assert_eq!(c, 0.0);
    }

    #[test]
    fn cost_uses_half_mean_convention() {
        // Residuals at θ = 0 are -1, -3, -5 → (1 + 9 + 25) / (2·3).
        let ds = Dataset::from_rows(&["x"], &[vec![0.0], vec![1.0], vec![2.0]], &[1.0, 3.0, 5.0]).unwrap();
        let design = AugmentedDesign::from_dataset(&ds);
        let c = cost(&design, ds.targets(), &Parameters::zeros(2)).unwrap();
        assert!((c - 35.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_cost_is_defined() {
        let ds = Dataset::from_rows(&["x"], &[vec![4.0]], &[10.0]).unwrap();
        let design = AugmentedDesign::from_dataset(&ds);
        let c = cost(&design, ds.targets(), &Parameters::from_slice(&[2.0, 2.0])).unwrap();
        assert_eq!(c, 0.0);
        let c = cost(&design, ds.targets(), &Parameters::zeros(2)).unwrap();
        assert_eq!(c, 50.0);
    }

    #[test]
    fn cost_is_idempotent() {
        let ds = Dataset::from_rows(&["a", "b"], &[vec![1.5, 2.0], vec![3.0, -1.0]], &[4.0, 0.5]).unwrap();
        let design = AugmentedDesign::from_dataset(&ds);
        let p = Parameters::from_slice(&[0.3, -0.7, 1.1]);
        let first = cost(&design, ds.targets(), &p).unwrap();
        let second = cost(&design, ds.targets(), &p).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn wrong_parameter_length_is_rejected() {
        let ds = Dataset::from_rows(&["x"], &[vec![0.0], vec![1.0]], &[1.0, 2.0]).unwrap();
        let design = AugmentedDesign::from_dataset(&ds);
        let err = cost(&design, ds.targets(), &Parameters::zeros(3)).unwrap_err();
        assert!(matches!(err, RegressionError::DimensionMismatch { expected: 2, found: 3, .. }));
    }
}
