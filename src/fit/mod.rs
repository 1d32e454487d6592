//! The numeric engine.
//!
//! Responsibilities:
//!
//! - closed-form least squares fit (`closed_form`)
//! - half-MSE cost evaluation (`cost`)
//! - 2D cost landscape scans (`landscape`, parallel)
//! - batch gradient descent (`descent`)
//!
//! The closed form and the optimizer are independent; both only share the
//! augmented design from `models`.

pub mod closed_form;
pub mod cost;
pub mod descent;
pub mod landscape;

pub use closed_form::*;
pub use cost::*;
pub use descent::*;
pub use landscape::*;
