//! Linear model implementation.
//!
//! Prediction and design-row construction are small, pure functions so the
//! fitter, the optimizer and the landscape scan can share them.

pub mod model;

pub use model::*;
