//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - builds the dataset (reference table or synthetic)
//! - runs the pipeline stages the subcommand asks for
//! - prints reports/plots
//! - writes optional exports and charts

use clap::Parser;
use log::LevelFilter;

use crate::cli::{Command, RunArgs};
use crate::domain::{DatasetSource, DescentConfig, FitMethod, LandscapeConfig, RunConfig, SurfaceConfig};
use crate::error::AppError;

pub mod pipeline;

use pipeline::{RunOutput, Stages};

/// Entry point for the `lrl` binary.
pub fn run() -> Result<(), AppError> {
    // `lrl` and `lrl --synthetic 50` behave like `lrl run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(args) => handle(&args, Stages::Full),
        Command::Fit(args) => handle(&args, Stages::FitOnly),
        Command::Descend(args) => handle(&args, Stages::DescentOnly),
    }
}

/// Warnings by default; `RUST_LOG` still overrides per module.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A second init (tests) is harmless.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn handle(args: &RunArgs, stages: Stages) -> Result<(), AppError> {
    let config = run_config_from_args(args);
    let out = pipeline::run_pipeline(&config, stages)?;

    print_reports(&out, &config);
    write_outputs(&out, &config)?;

    Ok(())
}

fn print_reports(out: &RunOutput, config: &RunConfig) {
    if let (Some(fit), false) = (&out.fit, out.predictions.is_empty()) {
        println!(
            "{}",
            crate::report::format_fit_summary(&out.dataset, fit, &out.source_label)
        );
        println!(
            "{}",
            crate::report::format_predictions(out.dataset.feature_names(), &out.predictions)
        );
    }

    if let Some(landscape) = &out.landscape {
        println!("{}", crate::report::format_landscape_summary(landscape));
    }

    if let Some(run) = &out.descent {
        println!(
            "{}",
            crate::report::format_descent_summary(run, out.fit.as_ref())
        );
    }

    if !config.plot {
        return;
    }
    if let Some(run) = &out.descent {
        println!(
            "{}",
            crate::plot::render_convergence_plot(run, config.plot_width, config.plot_height)
        );
    }
    if !out.predictions.is_empty() {
        println!(
            "{}",
            crate::plot::render_predicted_vs_actual(&out.predictions, config.plot_width, config.plot_height)
        );
    }
}

fn write_outputs(out: &RunOutput, config: &RunConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_predictions {
        if out.predictions.is_empty() {
            log::warn!("no predictions in this run; skipping {}", path.display());
        } else {
            crate::io::write_predictions_csv(path, out.dataset.feature_names(), &out.predictions)?;
        }
    }

    if let Some(path) = &config.export_report {
        let report = crate::io::RunReport::new(
            out.source_label.clone(),
            out.dataset.feature_names(),
            out.fit.as_ref(),
            out.landscape.as_ref(),
            out.surface.as_ref(),
            out.descent.as_ref(),
            &out.predictions,
        );
        crate::io::write_report_json(path, &report)?;
    }

    if let Some(dir) = &config.charts_dir {
        match (&out.fit, &out.surface, &out.landscape, &out.descent) {
            (Some(fit), Some(surface), Some(landscape), Some(descent)) => {
                let inputs = crate::plot::ChartInputs {
                    dataset: &out.dataset,
                    fitted: &fit.parameters,
                    predictions: &out.predictions,
                    surface,
                    landscape,
                    descent,
                };
                let written = crate::plot::write_charts(dir, &inputs)?;
                for path in written {
                    println!("wrote {}", path.display());
                }
            }
            _ => log::warn!("charts need every stage; use `lrl run --charts {}`", dir.display()),
        }
    }

    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> RunConfig {
    let source = match args.synthetic {
        Some(samples) => DatasetSource::Synthetic {
            samples,
            seed: args.seed,
            noise_std: args.noise,
        },
        None => DatasetSource::Reference,
    };

    RunConfig {
        source,
        fit_method: if args.least_norm {
            FitMethod::LeastNorm
        } else {
            FitMethod::Exact
        },
        descent: DescentConfig {
            learning_rate: args.learning_rate,
            iterations: args.iterations,
            guard: args.guard,
        },
        landscape: LandscapeConfig {
            axis_a: args.axis_a,
            axis_b: args.axis_b,
            span_a: args.span_a,
            span_b: args.span_b,
            steps: args.grid_steps,
        },
        surface: SurfaceConfig {
            steps: args.surface_steps,
            ..SurfaceConfig::default()
        },
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_predictions: args.export_predictions.clone(),
        export_report: args.export_report.clone(),
        charts_dir: args.charts.clone(),
    }
}

/// Rewrite argv so `lrl` defaults to `lrl run`.
///
/// Rules:
/// - `lrl`                      -> `lrl run`
/// - `lrl --synthetic 50 ...`   -> `lrl run --synthetic 50 ...`
/// - `lrl --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "fit" | "descend");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DivergenceGuard;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_run() {
        assert_eq!(rewrite_args(argv(&["lrl"])), argv(&["lrl", "run"]));
        assert_eq!(
            rewrite_args(argv(&["lrl", "--synthetic", "50"])),
            argv(&["lrl", "run", "--synthetic", "50"])
        );
        assert_eq!(rewrite_args(argv(&["lrl", "--help"])), argv(&["lrl", "--help"]));
        assert_eq!(rewrite_args(argv(&["lrl", "fit"])), argv(&["lrl", "fit"]));
    }

    #[test]
    fn config_from_args_maps_flags() {
        let cli = crate::cli::Cli::parse_from([
            "lrl",
            "run",
            "--synthetic",
            "30",
            "--seed",
            "9",
            "--least-norm",
            "--guard",
            "off",
            "--no-plot",
            "--surface-steps",
            "4",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = run_config_from_args(&args);
        assert_eq!(
            config.source,
            DatasetSource::Synthetic {
                samples: 30,
                seed: 9,
                noise_std: 10.0
            }
        );
        assert_eq!(config.fit_method, FitMethod::LeastNorm);
        assert_eq!(config.descent.guard, DivergenceGuard::Off);
        assert_eq!(config.surface.steps, 4);
        assert!(!config.plot);
    }
}
