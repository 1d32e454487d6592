//! Seeded synthetic house prices.
//!
//! Samples are drawn around a known linear model so that larger, well-posed
//! problems can be fitted and the recovered parameters compared against the
//! truth. Same seed, same dataset.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::housing::FEATURE_NAMES;
use crate::domain::{Dataset, Parameters};
use crate::error::{RegressionError, RegressionResult};
use crate::models::predict_row;

/// Generating model: intercept, area, rooms, distance.
pub const TRUE_PARAMETERS: [f64; 4] = [-385.0, 3.1, 44.8, 16.2];

const AREA_RANGE: (f64, f64) = (80.0, 220.0);
const ROOMS_RANGE: (u32, u32) = (1, 5);
const DISTANCE_RANGE: (f64, f64) = (1.0, 15.0);

/// Largest synthetic dataset the generator will build.
pub const MAX_SYNTHETIC_SAMPLES: usize = 1_000_000;

#[derive(Debug, Clone)]
pub struct SyntheticData {
    pub dataset: Dataset,
    pub true_parameters: Parameters,
}

/// Draw `samples` houses and price them with `TRUE_PARAMETERS` plus Gaussian noise.
pub fn generate_synthetic(samples: usize, seed: u64, noise_std: f64) -> RegressionResult<SyntheticData> {
    if !(1..=MAX_SYNTHETIC_SAMPLES).contains(&samples) {
        return Err(RegressionError::invalid_config(
            "synthetic samples",
            format!("{samples} (must be in 1..={MAX_SYNTHETIC_SAMPLES})"),
        ));
    }
    if !(noise_std.is_finite() && noise_std >= 0.0) {
        return Err(RegressionError::invalid_config(
            "noise",
            format!("{noise_std} (must be finite and >= 0)"),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, noise_std)
        .map_err(|e| RegressionError::invalid_config("noise", e.to_string()))?;
    let truth = Parameters::from_slice(&TRUE_PARAMETERS);

    let mut rows = Vec::with_capacity(samples);
    let mut targets = Vec::with_capacity(samples);
    for _ in 0..samples {
        let area = rng.gen_range(AREA_RANGE.0..=AREA_RANGE.1);
        let rooms = rng.gen_range(ROOMS_RANGE.0..=ROOMS_RANGE.1) as f64;
        let distance = rng.gen_range(DISTANCE_RANGE.0..=DISTANCE_RANGE.1);
        let row = vec![area, rooms, distance];

        let price = predict_row(&truth, &row)? + normal.sample(&mut rng);
        rows.push(row);
        targets.push(price);
    }

    log::debug!("generated {samples} synthetic samples (seed={seed}, noise_std={noise_std})");

    Ok(SyntheticData {
        dataset: Dataset::from_rows(&FEATURE_NAMES, &rows, &targets)?,
        true_parameters: truth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitMethod;
    use crate::fit::fit_closed_form;

    #[test]
    fn same_seed_same_dataset() {
        let a = generate_synthetic(20, 7, 5.0).unwrap();
        let b = generate_synthetic(20, 7, 5.0).unwrap();
        assert_eq!(a.dataset, b.dataset);

        let c = generate_synthetic(20, 8, 5.0).unwrap();
        assert_ne!(a.dataset, c.dataset);
    }

    #[test]
    fn noiseless_sample_is_fitted_exactly() {
        let data = generate_synthetic(30, 42, 0.0).unwrap();
        let fit = fit_closed_form(&data.dataset, FitMethod::Exact).unwrap();
        assert!(fit.parameters.distance(&data.true_parameters) < 1e-6);
        assert!(fit.cost < 1e-12);
    }

    #[test]
    fn features_stay_in_range() {
        let data = generate_synthetic(200, 3, 1.0).unwrap();
        let (lo, hi) = data.dataset.feature_range(0);
        assert!(lo >= AREA_RANGE.0 && hi <= AREA_RANGE.1);
        let (lo, hi) = data.dataset.feature_range(1);
        assert!(lo >= 1.0 && hi <= 5.0);
    }

    #[test]
    fn zero_samples_is_rejected() {
        assert!(generate_synthetic(0, 1, 1.0).is_err());
    }

    #[test]
    fn oversized_sample_count_is_rejected() {
        assert!(matches!(
            generate_synthetic(usize::MAX, 1, 1.0),
            Err(RegressionError::InvalidConfig { .. })
        ));
    }
}
