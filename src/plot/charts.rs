//! SVG charts rendered with Plotters.
//!
//! Five figures are produced from the numeric outputs of a run:
//!
//! - `scatter_plane.svg`: observed samples and the fitted response surface (3D)
//! - `cost_contour.svg`: cost landscape as log-spaced level bands, minimum marked
//! - `convergence.svg`: gradient descent cost per iteration
//! - `predicted_vs_actual.svg`: fitted against observed targets, with `y = x`
//! - `cost_surface.svg`: cost landscape as a 3D surface
//!
//! The charts only read numbers; nothing here feeds back into the fit.

use std::error::Error;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::domain::{CostLandscape, Dataset, DescentRun, Parameters, ResponseSurface, SamplePrediction};
use crate::error::AppError;
use crate::math::log_space;

const SIZE: (u32, u32) = (900, 700);

/// Contour levels span 10⁰..10⁵.
const LEVEL_MIN: f64 = 1.0;
const LEVEL_MAX: f64 = 1e5;
const LEVEL_COUNT: usize = 20;

/// At most this many surface cells per axis in the 3D charts.
const MAX_SURFACE_CELLS: usize = 40;

type DrawResult = Result<(), Box<dyn Error>>;

/// Everything the charts need from a run.
pub struct ChartInputs<'a> {
    pub dataset: &'a Dataset,
    pub fitted: &'a Parameters,
    pub predictions: &'a [SamplePrediction],
    pub surface: &'a ResponseSurface,
    pub landscape: &'a CostLandscape,
    pub descent: &'a DescentRun,
}

/// Render all charts into `dir` and return the written paths.
pub fn write_charts(dir: &Path, inputs: &ChartInputs<'_>) -> Result<Vec<PathBuf>, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create chart dir '{}': {e}", dir.display())))?;

    let charts: [(&str, fn(&Path, &ChartInputs<'_>) -> DrawResult); 5] = [
        ("scatter_plane.svg", draw_scatter_plane),
        ("cost_contour.svg", draw_cost_contour),
        ("convergence.svg", draw_convergence),
        ("predicted_vs_actual.svg", draw_predicted_vs_actual),
        ("cost_surface.svg", draw_cost_surface),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (name, draw) in charts {
        let path = dir.join(name);
        draw(&path, inputs)
            .map_err(|e| AppError::new(2, format!("Failed to render '{}': {e}", path.display())))?;
        log::info!("wrote chart {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn draw_scatter_plane(path: &Path, inputs: &ChartInputs<'_>) -> DrawResult {
    let ds = inputs.dataset;
    let surface = inputs.surface;
    let names = ds.feature_names();

    let xs: Vec<f64> = ds.features().column(surface.feature_a).iter().copied().collect();
    let zs: Vec<f64> = ds.features().column(surface.feature_b).iter().copied().collect();
    let ys: Vec<f64> = ds.targets().iter().copied().collect();

    let (x0, x1) = padded(xs.iter().copied());
    let (z0, z1) = padded(zs.iter().copied());
    let (y0, y1) = padded(ys.iter().copied().chain(surface.predictions.iter().flatten().copied()));

    let pinned: Vec<String> = surface
        .pinned
        .iter()
        .map(|(j, mean)| format!("{}={mean:.2}", names[*j]))
        .collect();
    let caption = format!(
        "price over {} x {} (pinned at mean: {})",
        names[surface.feature_a],
        names[surface.feature_b],
        pinned.join(", ")
    );

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(20)
        .build_cartesian_3d(x0..x1, y0..y1, z0..z1)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.3;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()?;

    let plane = BLUE.mix(0.3);
    chart.draw_series(grid_polygons(&surface.a_values, &surface.b_values, &surface.predictions).map(
        |quad| Polygon::new(quad, plane.filled()),
    ))?;

    chart
        .draw_series(
            xs.iter()
                .zip(&ys)
                .zip(&zs)
                .map(|((&x, &y), &z)| Circle::new((x, y, z), 5, RED.filled())),
        )?
        .label("observed")
        .legend(|(x, y)| Circle::new((x, y), 5, RED.filled()));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_cost_contour(path: &Path, inputs: &ChartInputs<'_>) -> DrawResult {
    let land = inputs.landscape;
    let (Some(&a0), Some(&a1)) = (land.a_values.first(), land.a_values.last()) else {
        return Ok(());
    };
    let (Some(&b0), Some(&b1)) = (land.b_values.first(), land.b_values.last()) else {
        return Ok(());
    };
    let levels = log_space(LEVEL_MIN, LEVEL_MAX, LEVEL_COUNT)?;
    let da = (a1 - a0) / (land.a_values.len().max(2) - 1) as f64;
    let db = (b1 - b0) / (land.b_values.len().max(2) - 1) as f64;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Cost function level bands", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(a0 - da / 2.0..a1 + da / 2.0, b0 - db / 2.0..b1 + db / 2.0)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(format!("theta{}", land.axis_a))
        .y_desc(format!("theta{}", land.axis_b))
        .draw()?;

    let mut cells = Vec::with_capacity(land.a_values.len() * land.b_values.len());
    for (i, &a) in land.a_values.iter().enumerate() {
        for (j, &b) in land.b_values.iter().enumerate() {
            let band = level_band(land.costs[i][j], &levels);
            cells.push(Rectangle::new(
                [(a - da / 2.0, b - db / 2.0), (a + da / 2.0, b + db / 2.0)],
                band_color(band, levels.len()).filled(),
            ));
        }
    }
    chart.draw_series(cells)?;

    let fitted = (inputs.fitted.get(land.axis_a), inputs.fitted.get(land.axis_b));
    chart
        .draw_series(std::iter::once(Cross::new(fitted, 10, RED.stroke_width(3))))?
        .label("closed-form minimum")
        .legend(|(x, y)| Cross::new((x, y), 6, RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_convergence(path: &Path, inputs: &ChartInputs<'_>) -> DrawResult {
    let run = inputs.descent;
    let series: Vec<(f64, f64)> = run
        .history
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_finite())
        .map(|(i, &c)| (i as f64, c))
        .collect();
    let (x0, x1) = padded(series.iter().map(|p| p.0));
    let (y0, y1) = padded(series.iter().map(|p| p.1));

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Gradient descent convergence (alpha={:e})", run.config.learning_rate),
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x0..x1, y0..y1)?;
    chart
        .configure_mesh()
        .x_desc("iteration")
        .y_desc("cost J(theta)")
        .draw()?;
    chart.draw_series(LineSeries::new(series, &BLUE))?;

    root.present()?;
    Ok(())
}

fn draw_predicted_vs_actual(path: &Path, inputs: &ChartInputs<'_>) -> DrawResult {
    let rows = inputs.predictions;
    let (lo, hi) = padded(rows.iter().flat_map(|r| [r.actual, r.predicted]));
    let (a_lo, a_hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.actual), hi.max(r.actual))
    });

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Predicted vs actual", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, lo..hi)?;
    chart
        .configure_mesh()
        .x_desc("actual price")
        .y_desc("predicted price")
        .draw()?;

    chart.draw_series(LineSeries::new([(a_lo, a_lo), (a_hi, a_hi)], RED.stroke_width(2)))?;
    chart.draw_series(
        rows.iter()
            .filter(|r| r.predicted.is_finite())
            .map(|r| Circle::new((r.actual, r.predicted), 6, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_cost_surface(path: &Path, inputs: &ChartInputs<'_>) -> DrawResult {
    let land = inputs.landscape;
    let (x0, x1) = padded(land.a_values.iter().copied());
    let (z0, z1) = padded(land.b_values.iter().copied());
    let (y0, y1) = padded(land.costs.iter().flatten().copied());

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Cost surface over theta{} x theta{}", land.axis_a, land.axis_b),
            ("sans-serif", 24),
        )
        .margin(20)
        .build_cartesian_3d(x0..x1, y0..y1, z0..z1)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.5;
        pb.pitch = 0.35;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()?;

    let span = (y1 - y0).max(f64::MIN_POSITIVE);
    chart.draw_series(
        grid_polygons(&land.a_values, &land.b_values, &land.costs).map(|quad| {
            let mean = quad.iter().map(|p| p.1).sum::<f64>() / quad.len() as f64;
            let t = ((mean - y0) / span).clamp(0.0, 1.0);
            Polygon::new(quad, gradient_color(t).mix(0.85).filled())
        }),
    )?;

    root.present()?;
    Ok(())
}

/// Quads `(a, value, b)` covering a value grid, subsampled to at most
/// `MAX_SURFACE_CELLS` cells per axis.
fn grid_polygons<'a>(
    a_values: &'a [f64],
    b_values: &'a [f64],
    values: &'a [Vec<f64>],
) -> impl Iterator<Item = Vec<(f64, f64, f64)>> + 'a {
    let ia = subsample(a_values.len());
    let ib = subsample(b_values.len());
    let mut quads = Vec::new();
    for w in ia.windows(2) {
        for v in ib.windows(2) {
            let (i0, i1, j0, j1) = (w[0], w[1], v[0], v[1]);
            let quad = vec![
                (a_values[i0], values[i0][j0], b_values[j0]),
                (a_values[i1], values[i1][j0], b_values[j0]),
                (a_values[i1], values[i1][j1], b_values[j1]),
                (a_values[i0], values[i0][j1], b_values[j1]),
            ];
            if quad.iter().all(|p| p.1.is_finite()) {
                quads.push(quad);
            }
        }
    }
    quads.into_iter()
}

/// Indices `0..len` thinned to at most `MAX_SURFACE_CELLS + 1` points, always
/// keeping the last one.
fn subsample(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let stride = (len - 1).div_ceil(MAX_SURFACE_CELLS).max(1);
    let mut idx: Vec<usize> = (0..len).step_by(stride).collect();
    if idx.last() != Some(&(len - 1)) {
        idx.push(len - 1);
    }
    idx
}

/// Number of contour levels at or below `cost`.
fn level_band(cost: f64, levels: &[f64]) -> usize {
    levels.iter().take_while(|&&l| l <= cost).count()
}

fn band_color(band: usize, n_levels: usize) -> HSLColor {
    gradient_color(band as f64 / n_levels.max(1) as f64)
}

/// Dark violet (0) to yellow (1).
fn gradient_color(t: f64) -> HSLColor {
    let t = t.clamp(0.0, 1.0);
    HSLColor(0.75 - 0.6 * t, 0.75, 0.25 + 0.4 * t)
}

/// `(min, max)` of the finite values, widened so the range is never empty.
fn padded(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo).abs() * 0.05).max(1e-9 * lo.abs().max(1.0));
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_band_counts_levels_below() {
        let levels = log_space(LEVEL_MIN, LEVEL_MAX, LEVEL_COUNT).unwrap();
        assert_eq!(level_band(0.5, &levels), 0);
        assert_eq!(level_band(1.0, &levels), 1);
        assert_eq!(level_band(1e6, &levels), LEVEL_COUNT);
    }

    #[test]
    fn subsample_keeps_endpoints_and_bounds_cells() {
        let idx = subsample(100);
        assert_eq!(idx.first(), Some(&0));
        assert_eq!(idx.last(), Some(&99));
        assert!(idx.len() <= MAX_SURFACE_CELLS + 2);
        assert_eq!(subsample(10), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn padded_handles_flat_and_empty_ranges() {
        let (lo, hi) = padded([5.0, 5.0].into_iter());
        assert!(lo < 5.0 && hi > 5.0);
        assert_eq!(padded(std::iter::empty()), (0.0, 1.0));
        assert_eq!(padded([f64::NAN].into_iter()), (0.0, 1.0));
    }
}
