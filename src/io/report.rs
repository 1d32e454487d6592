//! JSON run report.
//!
//! The report is the hand-off to external visualization tools: every numeric
//! output of a run (fitted parameters, cost landscape, descent trajectory,
//! predictions) in one pretty-printed document. It is written, never read back.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::domain::{
    ClosedFormFit, CostLandscape, DescentConfig, DescentRun, FitMethod, ResponseSurface, SamplePrediction,
};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub tool: String,
    pub generated_at: String,
    pub dataset: String,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_form: Option<FitSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landscape: Option<CostLandscape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<ResponseSurface>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_descent: Option<DescentSection>,
    pub predictions: Vec<SamplePrediction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FitSection {
    pub method: FitMethod,
    pub rank: usize,
    pub parameters: Vec<f64>,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescentSection {
    pub config: DescentConfig,
    pub parameters: Vec<f64>,
    pub final_cost: f64,
    pub cost_history: Vec<f64>,
}

impl From<&ClosedFormFit> for FitSection {
    fn from(fit: &ClosedFormFit) -> Self {
        Self {
            method: fit.method,
            rank: fit.rank,
            parameters: fit.parameters.to_vec(),
            cost: fit.cost,
        }
    }
}

impl From<&DescentRun> for DescentSection {
    fn from(run: &DescentRun) -> Self {
        Self {
            config: run.config,
            parameters: run.parameters.to_vec(),
            final_cost: run.final_cost(),
            cost_history: run.history.clone(),
        }
    }
}

impl RunReport {
    pub fn new(
        dataset: impl Into<String>,
        features: &[String],
        fit: Option<&ClosedFormFit>,
        landscape: Option<&CostLandscape>,
        surface: Option<&ResponseSurface>,
        descent: Option<&DescentRun>,
        predictions: &[SamplePrediction],
    ) -> Self {
        Self {
            tool: "lrl".to_string(),
            generated_at: Local::now().to_rfc3339(),
            dataset: dataset.into(),
            features: features.to_vec(),
            closed_form: fit.map(FitSection::from),
            landscape: landscape.cloned(),
            surface: surface.cloned(),
            gradient_descent: descent.map(DescentSection::from),
            predictions: predictions.to_vec(),
        }
    }
}

/// Write the run report as pretty JSON.
///
/// Non-finite numbers (an unguarded diverging run) are written as `null`.
pub fn write_report_json(path: &Path, report: &RunReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    log::info!("wrote run report {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;
    use crate::domain::{DivergenceGuard, LandscapeConfig, SurfaceConfig};
    use crate::fit::{fit_closed_form, gradient_descent, scan_landscape};
    use crate::models::{AugmentedDesign, response_surface};
    use crate::report::compute_predictions;

    #[test]
    fn report_round_trips_through_json_value() {
        let ds = reference_dataset();
        let design = AugmentedDesign::from_dataset(&ds);
        let fit = fit_closed_form(&ds, FitMethod::Exact).unwrap();
        let land = scan_landscape(
            &design,
            ds.targets(),
            &fit.parameters,
            &LandscapeConfig {
                steps: 5,
                ..LandscapeConfig::default()
            },
        )
        .unwrap();
        let surface = response_surface(&fit.parameters, &ds, &SurfaceConfig::default()).unwrap();
        let run = gradient_descent(
            &design,
            ds.targets(),
            &DescentConfig {
                learning_rate: 1e-4,
                iterations: 3,
                guard: DivergenceGuard::Off,
            },
        )
        .unwrap();
        let preds = compute_predictions(&ds, &fit.parameters).unwrap();

        let report = RunReport::new(
            "reference",
            ds.feature_names(),
            Some(&fit),
            Some(&land),
            Some(&surface),
            Some(&run),
            &preds,
        );
        let tmp = tempfile::NamedTempFile::new().unwrap();
        write_report_json(tmp.path(), &report).unwrap();

        let value: serde_json::Value = serde_json::from_reader(File::open(tmp.path()).unwrap()).unwrap();
        assert_eq!(value["tool"], "lrl");
        assert_eq!(value["closed_form"]["method"], "exact");
        assert_eq!(value["closed_form"]["parameters"].as_array().unwrap().len(), 4);
        assert_eq!(value["landscape"]["costs"].as_array().unwrap().len(), 5);
        assert_eq!(value["gradient_descent"]["config"]["guard"], "off");
        assert_eq!(value["gradient_descent"]["cost_history"].as_array().unwrap().len(), 3);
        assert_eq!(value["predictions"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn missing_stages_are_omitted() {
        let ds = reference_dataset();
        let report = RunReport::new("reference", ds.feature_names(), None, None, None, None, &[]);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("closed_form").is_none());
        assert!(value.get("landscape").is_none());
        assert!(value.get("gradient_descent").is_none());
        assert_eq!(value["features"].as_array().unwrap().len(), 3);
    }
}
