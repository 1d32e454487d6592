//! Closed-form (ordinary least squares) fit.
//!
//! The intercept is absorbed into the augmented design, so the fit is a
//! single least squares solve over `[1, X]`. This path never touches the
//! optimizer; the two share only `AugmentedDesign`.

use crate::domain::{ClosedFormFit, Dataset, FitMethod, Parameters};
use crate::error::RegressionResult;
use crate::fit::cost::cost;
use crate::math::solve_least_squares;
use crate::models::AugmentedDesign;

/// Fit intercept + weights minimizing the squared residuals.
pub fn fit_closed_form(dataset: &Dataset, method: FitMethod) -> RegressionResult<ClosedFormFit> {
    let design = AugmentedDesign::from_dataset(dataset);
    log::debug!(
        "closed-form fit: n={} samples, p={} parameters, method={method:?}",
        design.n_samples(),
        design.n_params()
    );

    let solution = solve_least_squares(design.matrix(), dataset.targets(), method)?;
    if solution.rank < design.n_params() {
        log::warn!(
            "design is rank-deficient (rank {} < {}); returning the minimum-norm solution",
            solution.rank,
            design.n_params()
        );
    }

    let parameters = Parameters::new(solution.beta);
    let cost = cost(&design, dataset.targets(), &parameters)?;
    log::info!("closed-form fit done: cost={cost:.6}");

    Ok(ClosedFormFit {
        parameters,
        cost,
        rank: solution.rank,
        method,
    })
}
