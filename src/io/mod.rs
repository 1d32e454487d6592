//! Output helpers.
//!
//! - per-sample predictions CSV (`export`)
//! - JSON run report for external visualization (`report`)

pub mod export;
pub mod report;

pub use export::*;
pub use report::*;
