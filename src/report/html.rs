//! Self-contained HTML rendering of a [`Report`].
//!
//! Inline CSS only, no scripts or external assets. Every string taken from
//! the report is escaped.

use super::types::{DataDriftTable, DatasetDrift, Metric, RegressionComparison, Report};
use crate::eval::{ColumnKind, RegressionQuality, Severity};

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 2rem; color: #222; }
h1 { border-bottom: 2px solid #ddd; padding-bottom: .5rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid #ddd; padding: .4rem .6rem; text-align: left; }
th { background: #f5f5f5; }
td.num { text-align: right; font-family: monospace; }
.verdict { padding: .75rem 1rem; border-radius: 4px; font-weight: bold; }
.drift { background: #fde2e1; color: #8a1c14; }
.stable { background: #e3f4e1; color: #1d5e17; }
.warning { color: #8a5a00; }
";

/// Render the full report page.
pub fn render(report: &Report) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<title>Model performance dashboard</title>\n");
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<h1>Model performance dashboard</h1>\n");
    html.push_str(&format!("<p>Report version {}</p>\n", report.version));

    for metric in &report.metrics {
        html.push_str(&format!("<section id=\"{}\">\n", escape_html(metric.name())));
        match metric {
            Metric::DatasetDriftMetric(d) => render_dataset_drift(&mut html, d),
            Metric::DataDriftTable(t) => render_drift_table(&mut html, t),
            Metric::RegressionQualityMetric(r) => render_regression(&mut html, r),
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_dataset_drift(html: &mut String, d: &DatasetDrift) {
    html.push_str("<h2>Dataset drift</h2>\n");
    let (class, text) =
        if d.dataset_drift { ("drift", "Dataset drift detected") } else { ("stable", "No dataset drift") };
    html.push_str(&format!("<p class=\"verdict {class}\">{text}</p>\n"));
    html.push_str(&format!(
        "<p>{} of {} columns drifted (share {:.3}, threshold {:.3}).</p>\n",
        d.number_of_drifted_columns, d.number_of_columns, d.share_of_drifted_columns, d.drift_share
    ));
}

fn render_drift_table(html: &mut String, t: &DataDriftTable) {
    html.push_str("<h2>Drift by column</h2>\n<table>\n");
    html.push_str(
        "<tr><th>Column</th><th>Type</th><th>Test</th><th>Threshold</th><th>Score</th><th>Drift</th></tr>\n",
    );
    for c in &t.drift_by_columns {
        let verdict = match (c.drift_detected, c.severity) {
            (true, _) => "<span class=\"drift\">Detected</span>",
            (false, Severity::Warning) => "<span class=\"warning\">Near threshold</span>",
            (false, _) => "Not detected",
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td>{verdict}</td></tr>\n",
            escape_html(&c.column_name),
            kind_label(c.column_type),
            escape_html(&c.stattest_name),
            number(c.stattest_threshold),
            number(c.drift_score),
        ));
    }
    html.push_str("</table>\n");
}

fn render_regression(html: &mut String, r: &RegressionComparison) {
    html.push_str("<h2>Regression quality</h2>\n<table>\n");
    html.push_str("<tr><th>Metric</th><th>Reference</th><th>Current</th></tr>\n");

    let rows: [(&str, fn(&RegressionQuality) -> String); 8] = [
        ("Rows", |q| q.rows.to_string()),
        ("RMSE", |q| number(q.rmse)),
        ("Mean absolute error", |q| number(q.mean_abs_error)),
        ("Mean error", |q| number(q.mean_error)),
        ("MAPE (%)", |q| q.mean_abs_perc_error.map_or_else(|| "n/a".to_string(), number)),
        ("R²", |q| number(q.r2_score)),
        ("Max absolute error", |q| number(q.abs_error_max)),
        ("Error std", |q| number(q.error_std)),
    ];
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            escape_html(label),
            value(&r.reference),
            value(&r.current),
        ));
    }
    html.push_str("</table>\n");
}

fn kind_label(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Numeric => "num",
        ColumnKind::Categorical => "cat",
    }
}

fn number(x: f64) -> String {
    if x.is_finite() {
        format!("{x:.4}")
    } else {
        x.to_string()
    }
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
