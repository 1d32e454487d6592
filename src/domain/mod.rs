//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the dataset and parameter containers (`Dataset`, `Parameters`)
//! - run configuration (`DescentConfig`, `LandscapeConfig`, `SurfaceConfig`, `RunConfig`)
//! - numeric outputs (`ClosedFormFit`, `DescentRun`, `CostLandscape`, etc.)

pub mod types;

pub use types::*;
