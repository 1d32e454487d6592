//! Mathematical utilities: SVD least squares and grid spacing.

pub mod grid;
pub mod ols;

pub use grid::*;
pub use ols::*;
