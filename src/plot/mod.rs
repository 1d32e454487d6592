//! Plotting.
//!
//! - terminal ASCII plots for quick sanity checks (`ascii`)
//! - SVG chart files for the full run (`charts`)

pub mod ascii;
pub mod charts;

pub use ascii::*;
pub use charts::*;
