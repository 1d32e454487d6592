//! The built-in house price table.
//!
//! | area (m²) | rooms | distance to centre (km) | price |
//! |-----------|-------|-------------------------|-------|
//! | 150       | 3     | 5                       | 300   |
//! | 120       | 2     | 10                      | 250   |
//! | 200       | 4     | 2                       | 450   |
//! | 180       | 3     | 3                       | 350   |
//! | 100       | 2     | 12                      | 200   |

use nalgebra::{DMatrix, DVector};

use crate::domain::Dataset;

pub const FEATURE_NAMES: [&str; 3] = ["area", "rooms", "distance"];

const FEATURES: [[f64; 3]; 5] = [
    [150.0, 3.0, 5.0],
    [120.0, 2.0, 10.0],
    [200.0, 4.0, 2.0],
    [180.0, 3.0, 3.0],
    [100.0, 2.0, 12.0],
];

const PRICES: [f64; 5] = [300.0, 250.0, 450.0, 350.0, 200.0];

/// Build the reference dataset (5 samples × 3 features).
pub fn reference_dataset() -> Dataset {
    let features = DMatrix::from_fn(FEATURES.len(), FEATURE_NAMES.len(), |i, j| FEATURES[i][j]);
    let targets = DVector::from_column_slice(&PRICES);
    let names = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
    // Dimensions are fixed by the constants above.
    match Dataset::new(names, features, targets) {
        Ok(ds) => ds,
        Err(e) => unreachable!("reference dataset is well-formed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_dataset_shape() {
        let ds = reference_dataset();
        assert_eq!(ds.n_samples(), 5);
        assert_eq!(ds.n_features(), 3);
        assert_eq!(ds.sample(2), vec![200.0, 4.0, 2.0]);
        assert_eq!(ds.targets()[4], 200.0);
        assert!((ds.feature_mean(1) - 2.8).abs() < 1e-12);
    }
}
