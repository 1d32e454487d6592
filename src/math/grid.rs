//! Evenly spaced coordinate sequences for landscape scans, response surfaces
//! and contour levels.

use crate::error::{RegressionError, RegressionResult};

/// Longest sequence either generator will allocate.
pub const MAX_GRID_POINTS: usize = 1 << 20;

fn check_steps(field: &'static str, steps: usize) -> RegressionResult<()> {
    if !(2..=MAX_GRID_POINTS).contains(&steps) {
        return Err(RegressionError::invalid_config(
            field,
            format!("{steps} (must be in 2..={MAX_GRID_POINTS})"),
        ));
    }
    Ok(())
}

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn linspace(min: f64, max: f64, steps: usize) -> RegressionResult<Vec<f64>> {
    if !(min.is_finite() && max.is_finite() && max >= min) {
        return Err(RegressionError::invalid_config(
            "grid range",
            format!("min={min}, max={max} (must be finite and max>=min)"),
        ));
    }
    check_steps("grid steps", steps)?;

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out: Vec<f64> = (0..steps).map(|i| min + step * i as f64).collect();
    // Pin the last point so rounding never overshoots the range.
    out[steps - 1] = max;
    Ok(out)
}

/// `steps` points spanning `center ± half_width`.
pub fn centered(center: f64, half_width: f64, steps: usize) -> RegressionResult<Vec<f64>> {
    linspace(center - half_width, center + half_width, steps)
}

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> RegressionResult<Vec<f64>> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(RegressionError::invalid_config(
            "log range",
            format!("min={min}, max={max} (must be finite, >0, and max>min)"),
        ));
    }
    check_steps("log steps", steps)?;

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push((ln_min + step * i as f64).exp());
    }
    Ok(out)
}
