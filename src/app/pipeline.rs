//! Shared run pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> closed-form fit -> predictions -> landscape scan -> response surface -> gradient descent
//!
//! The subcommands then only decide which stages to run and what to print.

use crate::data::{generate_synthetic, reference_dataset};
use crate::domain::{
    ClosedFormFit, CostLandscape, Dataset, DatasetSource, DescentRun, ResponseSurface, RunConfig, SamplePrediction,
};
use crate::error::RegressionResult;
use crate::fit::{fit_closed_form, gradient_descent, scan_landscape};
use crate::models::{AugmentedDesign, response_surface};
use crate::report::compute_predictions;

/// Which stages a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stages {
    /// Everything.
    Full,
    /// Closed-form fit and predictions.
    FitOnly,
    /// Gradient descent, with the closed-form fit computed as a reference when it exists.
    DescentOnly,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub source_label: String,
    pub fit: Option<ClosedFormFit>,
    pub predictions: Vec<SamplePrediction>,
    pub landscape: Option<CostLandscape>,
    pub surface: Option<ResponseSurface>,
    pub descent: Option<DescentRun>,
}

/// Build the dataset described by the config.
pub fn load_dataset(source: DatasetSource) -> RegressionResult<(Dataset, String)> {
    match source {
        DatasetSource::Reference => Ok((reference_dataset(), "reference housing table".to_string())),
        DatasetSource::Synthetic {
            samples,
            seed,
            noise_std,
        } => {
            let synthetic = generate_synthetic(samples, seed, noise_std)?;
            let label = format!("synthetic (n={samples}, seed={seed}, noise={noise_std})");
            Ok((synthetic.dataset, label))
        }
    }
}

/// Execute the pipeline stages and return the computed outputs.
pub fn run_pipeline(config: &RunConfig, stages: Stages) -> RegressionResult<RunOutput> {
    let (dataset, source_label) = load_dataset(config.source)?;
    log::info!(
        "dataset: {source_label}, {} samples × {} features",
        dataset.n_samples(),
        dataset.n_features()
    );

    let design = AugmentedDesign::from_dataset(&dataset);

    let fit = match stages {
        Stages::Full | Stages::FitOnly => Some(fit_closed_form(&dataset, config.fit_method)?),
        Stages::DescentOnly => match fit_closed_form(&dataset, config.fit_method) {
            Ok(fit) => Some(fit),
            Err(err) => {
                log::debug!("no closed-form reference for descent: {err}");
                None
            }
        },
    };

    let predictions = match (&fit, stages) {
        (Some(fit), Stages::Full | Stages::FitOnly) => compute_predictions(&dataset, &fit.parameters)?,
        _ => Vec::new(),
    };

    let (landscape, surface) = match (&fit, stages) {
        (Some(fit), Stages::Full) => {
            let landscape = scan_landscape(&design, dataset.targets(), &fit.parameters, &config.landscape)?;
            let surface = response_surface(&fit.parameters, &dataset, &config.surface)?;
            (Some(landscape), Some(surface))
        }
        _ => (None, None),
    };

    let descent = match stages {
        Stages::Full | Stages::DescentOnly => Some(gradient_descent(&design, dataset.targets(), &config.descent)?),
        Stages::FitOnly => None,
    };

    Ok(RunOutput {
        dataset,
        source_label,
        fit,
        predictions,
        landscape,
        surface,
        descent,
    })
}
