//! Export per-sample predictions to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::SamplePrediction;
use crate::error::AppError;

/// Write per-sample predictions to a CSV file.
pub fn write_predictions_csv(
    path: &Path,
    feature_names: &[String],
    rows: &[SamplePrediction],
) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // Header
    writeln!(file, "sample,{},actual,predicted,residual", feature_names.join(","))
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in rows {
        let features: Vec<String> = r.features.iter().map(|x| format!("{x}")).collect();
        writeln!(
            file,
            "{},{},{:.10},{:.10},{:.10}",
            r.index + 1,
            features.join(","),
            r.actual,
            r.predicted,
            r.residual,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    log::info!("wrote predictions CSV {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_one_row_per_sample() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let names = vec!["area".to_string(), "rooms".to_string()];
        let rows = vec![SamplePrediction {
            index: 0,
            features: vec![150.0, 3.0],
            actual: 300.0,
            predicted: 296.5,
            residual: 3.5,
        }];
        write_predictions_csv(tmp.path(), &names, &rows).unwrap();

        let txt = std::fs::read_to_string(tmp.path()).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "sample,area,rooms,actual,predicted,residual");
        assert_eq!(lines[1], "1,150,3,300.0000000000,296.5000000000,3.5000000000");
        assert_eq!(lines.len(), 2);
    }
}
