//! Shared domain types.
//!
//! Numeric containers wrap `nalgebra` vectors/matrices; configuration and
//! result types are plain values so the pipeline can run several
//! configurations side by side.

use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{RegressionError, RegressionResult};

/// Feature matrix (n samples × k features), target vector and feature names.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    feature_names: Vec<String>,
    features: DMatrix<f64>,
    targets: DVector<f64>,
}

impl Dataset {
    /// Build a dataset, checking that every dimension agrees.
    pub fn new(
        feature_names: Vec<String>,
        features: DMatrix<f64>,
        targets: DVector<f64>,
    ) -> RegressionResult<Self> {
        if features.nrows() == 0 || features.ncols() == 0 {
            return Err(RegressionError::EmptyDataset);
        }
        if targets.len() != features.nrows() {
            return Err(RegressionError::DimensionMismatch {
                what: "target vector",
                expected: features.nrows(),
                found: targets.len(),
            });
        }
        if feature_names.len() != features.ncols() {
            return Err(RegressionError::DimensionMismatch {
                what: "feature names",
                expected: features.ncols(),
                found: feature_names.len(),
            });
        }
        Ok(Self {
            feature_names,
            features,
            targets,
        })
    }

    /// Build a dataset from per-sample rows.
    ///
    /// Every row must have the same length as `feature_names`.
    pub fn from_rows(feature_names: &[&str], rows: &[Vec<f64>], targets: &[f64]) -> RegressionResult<Self> {
        let k = feature_names.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != k) {
            return Err(RegressionError::DimensionMismatch {
                what: "sample feature count",
                expected: k,
                found: bad.len(),
            });
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let features = DMatrix::from_row_slice(rows.len(), k, &flat);
        Self::new(
            feature_names.iter().map(|s| s.to_string()).collect(),
            features,
            DVector::from_column_slice(targets),
        )
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &DMatrix<f64> {
        &self.features
    }

    pub fn targets(&self) -> &DVector<f64> {
        &self.targets
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Parameter count of a model on this dataset (intercept + one weight per feature).
    pub fn n_params(&self) -> usize {
        self.n_features() + 1
    }

    /// Features of sample `i` as an owned row.
    pub fn sample(&self, i: usize) -> Vec<f64> {
        self.features.row(i).iter().copied().collect()
    }

    pub fn feature_mean(&self, j: usize) -> f64 {
        self.features.column(j).mean()
    }

    /// `(min, max)` of feature `j`.
    pub fn feature_range(&self, j: usize) -> (f64, f64) {
        let col = self.features.column(j);
        (col.min(), col.max())
    }
}

/// Model parameters: index 0 is the intercept, the rest are per-feature weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters(DVector<f64>);

impl Parameters {
    pub fn new(values: DVector<f64>) -> Self {
        Self(values)
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self(DVector::from_column_slice(values))
    }

    /// All-zero parameters for a model with `len` entries.
    pub fn zeros(len: usize) -> Self {
        Self(DVector::zeros(len))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn intercept(&self) -> f64 {
        self.0[0]
    }

    pub fn weights(&self) -> &[f64] {
        &self.0.as_slice()[1..]
    }

    pub fn get(&self, i: usize) -> f64 {
        self.0[i]
    }

    pub fn as_vector(&self) -> &DVector<f64> {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.iter().copied().collect()
    }

    /// Copy of `self` with entry `i` replaced by `value`.
    pub fn with(&self, i: usize, value: f64) -> Self {
        let mut out = self.0.clone();
        out[i] = value;
        Self(out)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Euclidean distance to `other` (same length assumed).
    pub fn distance(&self, other: &Parameters) -> f64 {
        (&self.0 - &other.0).norm()
    }
}

/// How the closed-form fitter treats a rank-deficient design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMethod {
    /// Fail with `SingularMatrix` when the design is rank-deficient.
    Exact,
    /// Return the minimum-norm least-squares solution instead of failing.
    LeastNorm,
}

/// What the optimizer does when the cost stops behaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DivergenceGuard {
    /// Never stop early; NaN/Infinity flow into the history.
    Off,
    /// Stop with `Divergence` once the parameters or the cost are non-finite.
    NonFinite,
    /// Like `NonFinite`, and also stop on the first cost increase.
    Increasing,
}

/// Upper bound on gradient descent iterations (the cost history holds one `f64` each).
pub const MAX_ITERATIONS: usize = 10_000_000;

/// Upper bound on points per axis for landscape and response surface grids.
pub const MAX_GRID_STEPS: usize = 4_096;

/// Gradient descent settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescentConfig {
    /// Step size α.
    pub learning_rate: f64,
    /// Total number of steps (the only termination condition).
    pub iterations: usize,
    pub guard: DivergenceGuard,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-5,
            iterations: 100,
            guard: DivergenceGuard::NonFinite,
        }
    }
}

impl DescentConfig {
    pub fn validate(&self) -> RegressionResult<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(RegressionError::invalid_config(
                "learning_rate",
                format!("{} (must be finite and > 0)", self.learning_rate),
            ));
        }
        if self.iterations == 0 {
            return Err(RegressionError::invalid_config("iterations", "must be >= 1"));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(RegressionError::invalid_config(
                "iterations",
                format!("{} (must be <= {MAX_ITERATIONS})", self.iterations),
            ));
        }
        Ok(())
    }
}

/// Cost landscape scan: two parameter axes swept around the fitted values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandscapeConfig {
    /// Parameter index swept along the first axis.
    pub axis_a: usize,
    /// Parameter index swept along the second axis.
    pub axis_b: usize,
    /// Half-width of the sweep on axis A.
    pub span_a: f64,
    /// Half-width of the sweep on axis B.
    pub span_b: f64,
    /// Points per axis.
    pub steps: usize,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            axis_a: 1,
            axis_b: 3,
            span_a: 2.0,
            span_b: 15.0,
            steps: 100,
        }
    }
}

impl LandscapeConfig {
    pub fn validate(&self, n_params: usize) -> RegressionResult<()> {
        for (field, axis) in [("axis_a", self.axis_a), ("axis_b", self.axis_b)] {
            if axis >= n_params {
                return Err(RegressionError::invalid_config(
                    field,
                    format!("parameter index {axis} out of range (model has {n_params})"),
                ));
            }
        }
        if self.axis_a == self.axis_b {
            return Err(RegressionError::invalid_config("axis_b", "must differ from axis_a"));
        }
        for (field, span) in [("span_a", self.span_a), ("span_b", self.span_b)] {
            if !(span.is_finite() && span > 0.0) {
                return Err(RegressionError::invalid_config(field, format!("{span} (must be finite and > 0)")));
            }
        }
        if !(2..=MAX_GRID_STEPS).contains(&self.steps) {
            return Err(RegressionError::invalid_config(
                "steps",
                format!("{} (grid needs 2..={MAX_GRID_STEPS} points per axis)", self.steps),
            ));
        }
        Ok(())
    }
}

/// Response surface sweep: two features swept over their observed range,
/// the others pinned to their dataset mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub feature_a: usize,
    pub feature_b: usize,
    pub steps: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            feature_a: 0,
            feature_b: 2,
            steps: 10,
        }
    }
}

impl SurfaceConfig {
    pub fn validate(&self, n_features: usize) -> RegressionResult<()> {
        for (field, feature) in [("feature_a", self.feature_a), ("feature_b", self.feature_b)] {
            if feature >= n_features {
                return Err(RegressionError::invalid_config(
                    field,
                    format!("feature index {feature} out of range (dataset has {n_features})"),
                ));
            }
        }
        if self.feature_a == self.feature_b {
            return Err(RegressionError::invalid_config("feature_b", "must differ from feature_a"));
        }
        if !(2..=MAX_GRID_STEPS).contains(&self.steps) {
            return Err(RegressionError::invalid_config(
                "steps",
                format!("{} (surface needs 2..={MAX_GRID_STEPS} points per axis)", self.steps),
            ));
        }
        Ok(())
    }
}

/// Where the dataset comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DatasetSource {
    /// The built-in 5-sample house price table.
    Reference,
    /// Seeded synthetic house prices.
    Synthetic {
        samples: usize,
        seed: u64,
        noise_std: f64,
    },
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: DatasetSource,
    pub fit_method: FitMethod,
    pub descent: DescentConfig,
    pub landscape: LandscapeConfig,
    pub surface: SurfaceConfig,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_predictions: Option<PathBuf>,
    pub export_report: Option<PathBuf>,
    pub charts_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: DatasetSource::Reference,
            fit_method: FitMethod::Exact,
            descent: DescentConfig::default(),
            landscape: LandscapeConfig::default(),
            surface: SurfaceConfig::default(),
            plot: true,
            plot_width: 80,
            plot_height: 20,
            export_predictions: None,
            export_report: None,
            charts_dir: None,
        }
    }
}

/// Closed-form fit output.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedFormFit {
    pub parameters: Parameters,
    /// Half-MSE cost at `parameters`.
    pub cost: f64,
    /// Numerical rank of the augmented design.
    pub rank: usize,
    pub method: FitMethod,
}

/// Gradient descent output.
#[derive(Debug, Clone, PartialEq)]
pub struct DescentRun {
    pub config: DescentConfig,
    pub parameters: Parameters,
    /// Cost after each step; `history.len() == config.iterations`.
    pub history: Vec<f64>,
}

impl DescentRun {
    pub fn final_cost(&self) -> f64 {
        self.history.last().copied().unwrap_or(f64::NAN)
    }
}

/// Cost over a 2D slice of parameter space.
///
/// `costs[i][j]` is the cost with parameter `axis_a` at `a_values[i]` and
/// parameter `axis_b` at `b_values[j]`; every other parameter keeps its
/// fitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLandscape {
    pub axis_a: usize,
    pub axis_b: usize,
    pub a_values: Vec<f64>,
    pub b_values: Vec<f64>,
    pub costs: Vec<Vec<f64>>,
}

impl CostLandscape {
    /// Grid point with the lowest cost: `(a, b, cost)`.
    pub fn min_point(&self) -> Option<(f64, f64, f64)> {
        let mut best: Option<(f64, f64, f64)> = None;
        for (i, row) in self.costs.iter().enumerate() {
            for (j, &c) in row.iter().enumerate() {
                if best.is_none_or(|(_, _, b)| c < b) {
                    best = Some((self.a_values[i], self.b_values[j], c));
                }
            }
        }
        best
    }

    /// `(min, max)` cost over the grid.
    pub fn cost_range(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &c in self.costs.iter().flatten() {
            lo = lo.min(c);
            hi = hi.max(c);
        }
        (lo, hi)
    }
}

/// Model predictions over a 2D sweep of two features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSurface {
    pub feature_a: usize,
    pub feature_b: usize,
    pub a_values: Vec<f64>,
    pub b_values: Vec<f64>,
    /// `predictions[i][j]` at feature a = `a_values[i]`, feature b = `b_values[j]`.
    pub predictions: Vec<Vec<f64>>,
    /// Unswept features and the mean value they were pinned to.
    pub pinned: Vec<(usize, f64)>,
}

/// Per-sample fitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePrediction {
    pub index: usize,
    pub features: Vec<f64>,
    pub actual: f64,
    pub predicted: f64,
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_rejects_ragged_rows_and_short_targets() {
        let err = Dataset::from_rows(&["a", "b"], &[vec![1.0, 2.0], vec![3.0]], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, RegressionError::DimensionMismatch { expected: 2, found: 1, .. }));

        let err = Dataset::from_rows(&["a"], &[vec![1.0], vec![2.0]], &[1.0]).unwrap_err();
        assert!(matches!(err, RegressionError::DimensionMismatch { what: "target vector", .. }));

        let err = Dataset::from_rows(&["a"], &[], &[]).unwrap_err();
        assert_eq!(err, RegressionError::EmptyDataset);
    }

    #[test]
    fn dataset_column_stats() {
        let ds = Dataset::from_rows(&["a", "b"], &[vec![1.0, 10.0], vec![3.0, 30.0]], &[0.0, 1.0]).unwrap();
        assert_eq!(ds.n_params(), 3);
        assert!((ds.feature_mean(0) - 2.0).abs() < 1e-12);
        assert_eq!(ds.feature_range(1), (10.0, 30.0));
        assert_eq!(ds.sample(1), vec![3.0, 30.0]);
    }

    #[test]
    fn parameters_with_returns_a_copy() {
        let p = Parameters::from_slice(&[1.0, 2.0, 3.0]);
        let q = p.with(2, 9.0);
        assert_eq!(p.get(2), 3.0);
        assert_eq!(q.get(2), 9.0);
        assert_eq!(q.weights(), &[2.0, 9.0]);
        assert_eq!(q.intercept(), 1.0);
    }

    #[test]
    fn landscape_config_rejects_bad_axes() {
        let cfg = LandscapeConfig {
            axis_a: 1,
            axis_b: 1,
            ..LandscapeConfig::default()
        };
        assert!(cfg.validate(4).is_err());

        let cfg = LandscapeConfig {
            axis_b: 4,
            ..LandscapeConfig::default()
        };
        assert!(cfg.validate(4).is_err());
        assert!(LandscapeConfig::default().validate(4).is_ok());
    }

    #[test]
    fn descent_config_rejects_non_positive_rate() {
        let cfg = DescentConfig {
            learning_rate: 0.0,
            ..DescentConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = DescentConfig {
            iterations: 0,
            ..DescentConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
