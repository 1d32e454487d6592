//! Formatted terminal output.
//!
//! Formatting lives in one place so the numeric code stays free of
//! presentation concerns and output changes stay localized.

use crate::domain::{ClosedFormFit, CostLandscape, Dataset, DescentRun, Parameters, SamplePrediction};

/// `price = a + b*area + c*rooms + d*distance`, two decimals per coefficient.
pub fn format_equation(feature_names: &[String], params: &Parameters) -> String {
    let mut out = format!("price = {:.2}", params.intercept());
    for (name, w) in feature_names.iter().zip(params.weights()) {
        let sign = if *w < 0.0 { '-' } else { '+' };
        out.push_str(&format!(" {sign} {:.2}*{name}", w.abs()));
    }
    out
}

/// Dataset stats + closed-form fit diagnostics.
pub fn format_fit_summary(dataset: &Dataset, fit: &ClosedFormFit, source: &str) -> String {
    let mut out = String::new();

    out.push_str("=== lrl - linear regression cost landscape ===\n");
    out.push_str(&format!("Dataset: {source}\n"));
    out.push_str(&format!(
        "Samples: n={} | features: {}\n",
        dataset.n_samples(),
        dataset.feature_names().join(", ")
    ));
    for (j, name) in dataset.feature_names().iter().enumerate() {
        let (lo, hi) = dataset.feature_range(j);
        out.push_str(&format!(
            "  {:<12} range=[{lo:.2}, {hi:.2}] mean={:.3}\n",
            truncate(name, 12),
            dataset.feature_mean(j)
        ));
    }

    out.push_str("\nClosed-form fit:\n");
    out.push_str(&format!("- model : {}\n", format_equation(dataset.feature_names(), &fit.parameters)));
    out.push_str(&format!("- theta : {}\n", fmt_vec(&fit.parameters.to_vec())));
    out.push_str(&format!("- cost  : {:.6}\n", fit.cost));
    out.push_str(&format!(
        "- rank  : {}/{} ({:?})\n",
        fit.rank,
        fit.parameters.len(),
        fit.method
    ));
    out.push('\n');

    out
}

/// Per-sample actual vs. predicted table.
pub fn format_predictions(feature_names: &[String], rows: &[SamplePrediction]) -> String {
    let mut out = String::new();

    let mut header = format!("{:>6}", "sample");
    let mut rule = format!("{:->6}", "");
    for name in feature_names {
        header.push_str(&format!(" {:>10}", truncate(name, 10)));
        rule.push_str(&format!(" {:-<10}", ""));
    }
    header.push_str(&format!(" {:>12} {:>12} {:>12}", "actual", "predicted", "residual"));
    rule.push_str(&format!(" {:-<12} {:-<12} {:-<12}", "", "", ""));
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(rule.trim_end());
    out.push('\n');

    for r in rows {
        let mut line = format!("{:>6}", r.index + 1);
        for x in &r.features {
            line.push_str(&format!(" {x:>10.2}"));
        }
        line.push_str(&format!(
            " {:>12.3} {:>12.3} {:>12.3}",
            r.actual, r.predicted, r.residual
        ));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Gradient descent diagnostics, compared against the closed form when available.
pub fn format_descent_summary(run: &DescentRun, reference: Option<&ClosedFormFit>) -> String {
    let mut out = String::new();

    out.push_str("Gradient descent:\n");
    out.push_str(&format!(
        "- alpha={:e} iterations={} guard={:?}\n",
        run.config.learning_rate, run.config.iterations, run.config.guard
    ));
    if let Some(first) = run.history.first() {
        out.push_str(&format!("- cost  : {first:.6} -> {:.6}\n", run.final_cost()));
    }
    out.push_str(&format!("- theta : {}\n", fmt_vec(&run.parameters.to_vec())));

    if let Some(fit) = reference {
        out.push_str(&format!(
            "- gap to closed form: |Δθ|={:.6}, Δcost={:.6}\n",
            run.parameters.distance(&fit.parameters),
            run.final_cost() - fit.cost
        ));
    }
    let increases = run.history.windows(2).filter(|w| w[1] > w[0]).count();
    if increases > 0 {
        out.push_str(&format!(
            "- warning: cost increased on {increases} step(s); the learning rate may be too large\n"
        ));
    }
    out.push('\n');

    out
}

/// Landscape grid extent and minimum.
pub fn format_landscape_summary(landscape: &CostLandscape) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Cost landscape: theta{} x theta{} ({}x{} grid)\n",
        landscape.axis_a,
        landscape.axis_b,
        landscape.a_values.len(),
        landscape.b_values.len()
    ));
    if let (Some(a0), Some(a1)) = (landscape.a_values.first(), landscape.a_values.last()) {
        out.push_str(&format!("- theta{} in [{a0:.3}, {a1:.3}]\n", landscape.axis_a));
    }
    if let (Some(b0), Some(b1)) = (landscape.b_values.first(), landscape.b_values.last()) {
        out.push_str(&format!("- theta{} in [{b0:.3}, {b1:.3}]\n", landscape.axis_b));
    }
    let (lo, hi) = landscape.cost_range();
    out.push_str(&format!("- cost  in [{lo:.3}, {hi:.3}]\n"));
    if let Some((a, b, c)) = landscape.min_point() {
        out.push_str(&format!("- grid minimum at ({a:.4}, {b:.4}) cost={c:.6}\n"));
    }
    out.push('\n');

    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
