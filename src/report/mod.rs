//! Reporting utilities: per-sample predictions and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{Dataset, Parameters, SamplePrediction};
use crate::error::RegressionResult;
use crate::models::predict;

/// Compute fitted values and residuals for each sample.
pub fn compute_predictions(dataset: &Dataset, params: &Parameters) -> RegressionResult<Vec<SamplePrediction>> {
    let predicted = predict(params, dataset.features())?;
    let mut out = Vec::with_capacity(dataset.n_samples());
    for (i, (&y_fit, &actual)) in predicted.iter().zip(dataset.targets().iter()).enumerate() {
        out.push(SamplePrediction {
            index: i,
            features: dataset.sample(i),
            actual,
            predicted: y_fit,
            residual: actual - y_fit,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;
    use crate::domain::FitMethod;
    use crate::fit::{cost, fit_closed_form};
    use crate::models::AugmentedDesign;
    use nalgebra::DVector;

    #[test]
    fn reference_predictions_match_known_values() {
        let ds = reference_dataset();
        let fit = fit_closed_form(&ds, FitMethod::Exact).unwrap();
        let preds = compute_predictions(&ds, &fit.parameters).unwrap();
        let expected = [296.341_463_414_634_2, 239.024_390_243_902_47, 448.170_731_707_317_1, 357.317_073_170_731_76, 209.146_341_463_414_67];
        for (p, want) in preds.iter().zip(expected) {
            assert!((p.predicted - want).abs() < 1e-6);
            assert!((p.residual - (p.actual - p.predicted)).abs() < 1e-12);
        }
    }

    #[test]
    fn predictions_agree_with_cost_bit_for_bit() {
        let ds = reference_dataset();
        let design = AugmentedDesign::from_dataset(&ds);
        let params = Parameters::from_slice(&[-100.0, 2.5, 30.0, 5.0]);

        let predicted = predict(&params, ds.features()).unwrap();
        let n = ds.n_samples() as f64;
        let manual: f64 = predicted
            .iter()
            .zip(ds.targets().iter())
            .map(|(p, y)| (p - y) * (p - y))
            .sum::<f64>()
            / (2.0 * n);

        let from_eval = cost(&design, ds.targets(), &params).unwrap();
        assert_eq!(manual.to_bits(), from_eval.to_bits());

        let table = compute_predictions(&ds, &params).unwrap();
        let col = DVector::from_iterator(table.len(), table.iter().map(|p| p.predicted));
        assert_eq!(col, predicted);
    }
}
