//! Cost landscape over a 2D slice of parameter space.
//!
//! Two parameter indices are swept over `center ± span`; every other parameter
//! stays at its value in `center` (normally the closed-form optimum). Rows of
//! the grid are independent, so they are evaluated in parallel; the result is
//! identical to a sequential scan.

use nalgebra::DVector;
use rayon::prelude::*;

use crate::domain::{CostLandscape, LandscapeConfig, Parameters};
use crate::error::RegressionResult;
use crate::fit::cost::cost;
use crate::math::centered;
use crate::models::AugmentedDesign;

/// Evaluate the cost on a `steps × steps` grid around `center`.
pub fn scan_landscape(
    design: &AugmentedDesign,
    targets: &DVector<f64>,
    center: &Parameters,
    config: &LandscapeConfig,
) -> RegressionResult<CostLandscape> {
    design.check_params(center)?;
    config.validate(design.n_params())?;

    let a_values = centered(center.get(config.axis_a), config.span_a, config.steps)?;
    let b_values = centered(center.get(config.axis_b), config.span_b, config.steps)?;

    let costs: Vec<Vec<f64>> = a_values
        .par_iter()
        .map(|&a| {
            let row_params = center.with(config.axis_a, a);
            b_values
                .iter()
                .map(|&b| cost(design, targets, &row_params.with(config.axis_b, b)))
                .collect::<RegressionResult<Vec<f64>>>()
        })
        .collect::<RegressionResult<Vec<Vec<f64>>>>()?;

    log::debug!(
        "landscape scan: θ{} × θ{} on a {}×{} grid",
        config.axis_a,
        config.axis_b,
        a_values.len(),
        b_values.len()
    );

    Ok(CostLandscape {
        axis_a: config.axis_a,
        axis_b: config.axis_b,
        a_values,
        b_values,
        costs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;
    use crate::domain::FitMethod;
    use crate::error::RegressionError;
    use crate::fit::closed_form::fit_closed_form;

    #[test]
    fn reference_landscape_has_expected_shape_and_minimum() {
        let ds = reference_dataset();
        let design = AugmentedDesign::from_dataset(&ds);
        let fit = fit_closed_form(&ds, FitMethod::Exact).unwrap();

        // Odd step count puts the fitted point exactly on the grid centre.
        let cfg = LandscapeConfig {
            steps: 21,
            ..LandscapeConfig::default()
        };
        let land = scan_landscape(&design, ds.targets(), &fit.parameters, &cfg).unwrap();
        assert_eq!(land.a_values.len(), 21);
        assert_eq!(land.costs.len(), 21);
        assert!(land.costs.iter().all(|row| row.len() == 21));

        let (a, b, c) = land.min_point().unwrap();
        assert!((a - fit.parameters.get(1)).abs() < 1e-9);
        assert!((b - fit.parameters.get(3)).abs() < 1e-9);
        assert!((c - fit.cost).abs() < 1e-6);
        assert!(land.costs.iter().flatten().all(|&v| v >= fit.cost - 1e-9));
    }

    #[test]
    fn landscape_matches_direct_cost_evaluation() {
        let ds = reference_dataset();
        let design = AugmentedDesign::from_dataset(&ds);
        let center = Parameters::from_slice(&[-300.0, 2.0, 40.0, 10.0]);
        let cfg = LandscapeConfig {
            axis_a: 0,
            axis_b: 2,
            span_a: 10.0,
            span_b: 5.0,
            steps: 7,
        };
        let land = scan_landscape(&design, ds.targets(), &center, &cfg).unwrap();
        let p = center.with(0, land.a_values[3]).with(2, land.b_values[6]);
        let direct = cost(&design, ds.targets(), &p).unwrap();
        assert_eq!(land.costs[3][6].to_bits(), direct.to_bits());
    }

    #[test]
    fn out_of_range_axis_is_rejected() {
        let ds = reference_dataset();
        let design = AugmentedDesign::from_dataset(&ds);
        let cfg = LandscapeConfig {
            axis_b: 9,
            ..LandscapeConfig::default()
        };
        assert!(scan_landscape(&design, ds.targets(), &Parameters::zeros(4), &cfg).is_err());
    }

    #[test]
    fn wrong_length_center_is_rejected() {
        let ds = reference_dataset();
        let design = AugmentedDesign::from_dataset(&ds);
        let err = scan_landscape(&design, ds.targets(), &Parameters::zeros(3), &LandscapeConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            RegressionError::DimensionMismatch {
                what: "parameter vector",
                expected: 4,
                found: 3,
            }
        );
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocating() {
        let ds = reference_dataset();
        let design = AugmentedDesign::from_dataset(&ds);
        let cfg = LandscapeConfig {
            steps: usize::MAX,
            ..LandscapeConfig::default()
        };
        assert!(matches!(
            scan_landscape(&design, ds.targets(), &Parameters::zeros(4), &cfg),
            Err(RegressionError::InvalidConfig { field: "steps", .. })
        ));
    }
}
