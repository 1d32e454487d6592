use lr_landscape::app::pipeline::{Stages, run_pipeline};
use lr_landscape::data::reference_dataset;
use lr_landscape::domain::{DatasetSource, DescentConfig, DivergenceGuard, FitMethod, LandscapeConfig, RunConfig};
use lr_landscape::error::{AppError, RegressionError};
use lr_landscape::fit::{cost, fit_closed_form, gradient_descent};
use lr_landscape::models::AugmentedDesign;
use lr_landscape::plot::{ChartInputs, write_charts};

fn reference_config() -> RunConfig {
    RunConfig {
        landscape: LandscapeConfig {
            steps: 11,
            ..LandscapeConfig::default()
        },
        ..RunConfig::default()
    }
}

#[test]
fn descent_approaches_but_does_not_beat_the_closed_form() {
    let out = run_pipeline(&reference_config(), Stages::Full).unwrap();
    let fit = out.fit.unwrap();
    let run = out.descent.unwrap();

    assert!((fit.cost - 27.439024390243947).abs() < 1e-6);
    assert!(run.final_cost() >= fit.cost);
    assert!((run.final_cost() - 197.05318568292284).abs() < 1e-6);

    // The landscape minimum on an odd grid centred on the fit is the fit itself.
    let (_, _, min_cost) = out.landscape.unwrap().min_point().unwrap();
    assert!((min_cost - fit.cost).abs() < 1e-9);
}

#[test]
fn predictions_agree_with_cost() {
    let ds = reference_dataset();
    let fit = fit_closed_form(&ds, FitMethod::Exact).unwrap();
    let out = run_pipeline(&reference_config(), Stages::FitOnly).unwrap();

    let sse: f64 = out.predictions.iter().map(|p| p.residual * p.residual).sum();
    let design = AugmentedDesign::from_dataset(&ds);
    let c = cost(&design, ds.targets(), &fit.parameters).unwrap();
    assert!((sse / (2.0 * ds.n_samples() as f64) - c).abs() < 1e-9);
}

#[test]
fn large_learning_rate_diverges_with_exit_code_four() {
    let ds = reference_dataset();
    let design = AugmentedDesign::from_dataset(&ds);
    let config = DescentConfig {
        learning_rate: 1e-4,
        iterations: 5000,
        guard: DivergenceGuard::NonFinite,
    };
    let err = gradient_descent(&design, ds.targets(), &config).unwrap_err();
    assert!(matches!(err, RegressionError::Divergence { .. }));
    assert_eq!(AppError::from(err).exit_code(), 4);
}

#[test]
fn synthetic_run_recovers_generating_parameters() {
    let config = RunConfig {
        source: DatasetSource::Synthetic {
            samples: 200,
            seed: 7,
            noise_std: 0.0,
        },
        ..reference_config()
    };
    let out = run_pipeline(&config, Stages::FitOnly).unwrap();
    let fit = out.fit.unwrap();
    let expected = lr_landscape::data::TRUE_PARAMETERS;
    for (got, want) in fit.parameters.to_vec().iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
    }
}

#[test]
fn charts_are_written_as_svg() {
    let out = run_pipeline(&reference_config(), Stages::Full).unwrap();
    let fit = out.fit.as_ref().unwrap();
    let inputs = ChartInputs {
        dataset: &out.dataset,
        fitted: &fit.parameters,
        predictions: &out.predictions,
        surface: out.surface.as_ref().unwrap(),
        landscape: out.landscape.as_ref().unwrap(),
        descent: out.descent.as_ref().unwrap(),
    };

    let dir = tempfile::tempdir().unwrap();
    let written = write_charts(dir.path(), &inputs).unwrap();
    assert_eq!(written.len(), 5);
    for path in written {
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"), "{} is not an svg", path.display());
    }
}
