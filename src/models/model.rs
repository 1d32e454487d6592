//! Linear model evaluation.
//!
//! The fitter, the cost evaluator and the optimizer all share two primitives:
//! - build an augmented design row `[1, x₁, …, x_k]` (intercept first)
//! - predict `y = θ · [1, x]`
//!
//! `AugmentedDesign` is the matrix form of the first primitive.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Dataset, Parameters, ResponseSurface, SurfaceConfig};
use crate::error::{RegressionError, RegressionResult};
use crate::math::linspace;

/// Feature matrix with a constant 1.0 prepended to every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedDesign {
    matrix: DMatrix<f64>,
}

impl AugmentedDesign {
    pub fn from_features(features: &DMatrix<f64>) -> Self {
        let matrix = DMatrix::from_fn(features.nrows(), features.ncols() + 1, |i, j| {
            if j == 0 { 1.0 } else { features[(i, j - 1)] }
        });
        Self { matrix }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_features(dataset.features())
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn n_samples(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_params(&self) -> usize {
        self.matrix.ncols()
    }

    /// Check that `params` has one entry per design column.
    pub fn check_params(&self, params: &Parameters) -> RegressionResult<()> {
        if params.len() != self.n_params() {
            return Err(RegressionError::DimensionMismatch {
                what: "parameter vector",
                expected: self.n_params(),
                found: params.len(),
            });
        }
        Ok(())
    }

    /// `X_aug · θ`.
    pub fn predict(&self, params: &Parameters) -> RegressionResult<DVector<f64>> {
        self.check_params(params)?;
        Ok(&self.matrix * params.as_vector())
    }
}

/// Predict `y` for a single (unaugmented) sample.
pub fn predict_row(params: &Parameters, features: &[f64]) -> RegressionResult<f64> {
    if params.len() != features.len() + 1 {
        return Err(RegressionError::DimensionMismatch {
            what: "parameter vector",
            expected: features.len() + 1,
            found: params.len(),
        });
    }
    Ok(params.intercept()
        + params
            .weights()
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>())
}

/// Predicted targets for every sample of `features` (unaugmented).
pub fn predict(params: &Parameters, features: &DMatrix<f64>) -> RegressionResult<DVector<f64>> {
    AugmentedDesign::from_features(features).predict(params)
}

/// Sweep two features over their observed range and predict on the grid.
///
/// Unswept features are pinned to their dataset mean, so the surface is the
/// plane the model draws through the "average" sample in the remaining
/// dimensions.
pub fn response_surface(
    params: &Parameters,
    dataset: &Dataset,
    config: &SurfaceConfig,
) -> RegressionResult<ResponseSurface> {
    config.validate(dataset.n_features())?;
    if params.len() != dataset.n_params() {
        return Err(RegressionError::DimensionMismatch {
            what: "parameter vector",
            expected: dataset.n_params(),
            found: params.len(),
        });
    }

    let (a_min, a_max) = dataset.feature_range(config.feature_a);
    let (b_min, b_max) = dataset.feature_range(config.feature_b);
    let a_values = linspace(a_min, a_max, config.steps)?;
    let b_values = linspace(b_min, b_max, config.steps)?;

    let pinned: Vec<(usize, f64)> = (0..dataset.n_features())
        .filter(|&j| j != config.feature_a && j != config.feature_b)
        .map(|j| (j, dataset.feature_mean(j)))
        .collect();

    let mut sample = vec![0.0; dataset.n_features()];
    for &(j, mean) in &pinned {
        sample[j] = mean;
    }

    let mut predictions = Vec::with_capacity(a_values.len());
    for &a in &a_values {
        let mut row = Vec::with_capacity(b_values.len());
        for &b in &b_values {
            sample[config.feature_a] = a;
            sample[config.feature_b] = b;
            row.push(predict_row(params, &sample)?);
        }
        predictions.push(row);
    }

    Ok(ResponseSurface {
        feature_a: config.feature_a,
        feature_b: config.feature_b,
        a_values,
        b_values,
        predictions,
        pinned,
    })
}
