//! `lr-landscape` library crate.
//!
//! The binary (`lrl`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fit, cost and descent routines are reusable on their own
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
