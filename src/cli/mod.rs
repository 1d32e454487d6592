//! Command-line parsing for the `lrl` regression tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::DivergenceGuard;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "lrl",
    version,
    about = "Multivariate linear regression: closed-form fit, cost landscape, gradient descent"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit, scan the cost landscape, run gradient descent, and print everything.
    Run(RunArgs),
    /// Closed-form fit and prediction table only.
    Fit(RunArgs),
    /// Gradient descent only, with the convergence plot.
    Descend(RunArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Gradient descent learning rate.
    #[arg(short = 'a', long, default_value_t = 1e-5)]
    pub learning_rate: f64,

    /// Gradient descent iterations.
    #[arg(short = 'i', long, default_value_t = 100)]
    pub iterations: usize,

    /// When to stop a diverging descent.
    #[arg(long, value_enum, default_value_t = DivergenceGuard::NonFinite)]
    pub guard: DivergenceGuard,

    /// Return the minimum-norm solution for rank-deficient data instead of failing.
    #[arg(long)]
    pub least_norm: bool,

    /// Landscape grid steps per axis.
    #[arg(long, default_value_t = 100)]
    pub grid_steps: usize,

    /// Landscape half-width along the first swept parameter.
    #[arg(long, default_value_t = 2.0)]
    pub span_a: f64,

    /// Landscape half-width along the second swept parameter.
    #[arg(long, default_value_t = 15.0)]
    pub span_b: f64,

    /// Index of the first swept parameter (0 = intercept).
    #[arg(long, default_value_t = 1)]
    pub axis_a: usize,

    /// Index of the second swept parameter (0 = intercept).
    #[arg(long, default_value_t = 3)]
    pub axis_b: usize,

    /// Response surface grid steps per feature.
    #[arg(long, default_value_t = 10)]
    pub surface_steps: usize,

    /// Use N seeded synthetic samples instead of the reference table.
    #[arg(long, value_name = "N")]
    pub synthetic: Option<usize>,

    /// Random seed for synthetic data.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Noise standard deviation for synthetic targets.
    #[arg(long, default_value_t = 10.0)]
    pub noise: f64,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-sample predictions to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_predictions: Option<PathBuf>,

    /// Export the full run report to JSON.
    #[arg(long, value_name = "JSON")]
    pub export_report: Option<PathBuf>,

    /// Write SVG charts into this directory.
    #[arg(long, value_name = "DIR")]
    pub charts: Option<PathBuf>,
}
