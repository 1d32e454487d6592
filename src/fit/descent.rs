//! Batch gradient descent on the half-MSE cost.
//!
//! Starting from θ = 0, each iteration:
//!
//! 1. `predictions = X_aug θ`
//! 2. `errors = predictions - y`
//! 3. `gradient = 1/n · X_augᵀ errors`
//! 4. `θ ← θ - α · gradient`
//! 5. record `J(θ)`
//!
//! The run always lasts `iterations` steps; there is no convergence threshold.
//! A divergence guard may cut a run short with `RegressionError::Divergence`.

use nalgebra::DVector;

use crate::domain::{DescentConfig, DescentRun, DivergenceGuard, Parameters};
use crate::error::{RegressionError, RegressionResult};
use crate::fit::cost::cost;
use crate::models::AugmentedDesign;

/// Gradient of the half-MSE cost at `params`.
pub fn gradient(
    design: &AugmentedDesign,
    targets: &DVector<f64>,
    params: &Parameters,
) -> RegressionResult<DVector<f64>> {
    let predictions = design.predict(params)?;
    if predictions.len() != targets.len() {
        return Err(RegressionError::DimensionMismatch {
            what: "target vector",
            expected: predictions.len(),
            found: targets.len(),
        });
    }
    let errors = predictions - targets;
    let n = targets.len() as f64;
    Ok(design.matrix().tr_mul(&errors) / n)
}

/// Run gradient descent from the zero vector.
pub fn gradient_descent(
    design: &AugmentedDesign,
    targets: &DVector<f64>,
    config: &DescentConfig,
) -> RegressionResult<DescentRun> {
    config.validate()?;
    if design.n_samples() != targets.len() {
        return Err(RegressionError::DimensionMismatch {
            what: "target vector",
            expected: design.n_samples(),
            found: targets.len(),
        });
    }

    log::info!(
        "gradient descent: alpha={:e}, iterations={}, guard={:?}",
        config.learning_rate,
        config.iterations,
        config.guard
    );

    let mut params = Parameters::zeros(design.n_params());
    let mut history = Vec::with_capacity(config.iterations);

    for iteration in 0..config.iterations {
        let grad = gradient(design, targets, &params)?;
        params = Parameters::new(params.as_vector() - grad * config.learning_rate);
        let c = cost(design, targets, &params)?;

        if let Some(err) = check_divergence(config.guard, iteration, c, &params, history.last().copied()) {
            log::warn!("{err}");
            return Err(err);
        }
        history.push(c);
    }

    log::info!(
        "gradient descent done: final cost={:.6}",
        history.last().copied().unwrap_or(f64::NAN)
    );

    Ok(DescentRun {
        config: *config,
        parameters: params,
        history,
    })
}

fn check_divergence(
    guard: DivergenceGuard,
    iteration: usize,
    cost: f64,
    params: &Parameters,
    previous: Option<f64>,
) -> Option<RegressionError> {
    let non_finite = !cost.is_finite() || !params.is_finite();
    let increased = previous.is_some_and(|prev| cost > prev);
    let tripped = match guard {
        DivergenceGuard::Off => false,
        DivergenceGuard::NonFinite => non_finite,
        DivergenceGuard::Increasing => non_finite || increased,
    };
    tripped.then_some(RegressionError::Divergence { iteration, cost })
}
