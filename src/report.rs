//! Comparison rows and terminal table rendering
//!
//! Six display-only rows per run: the four asset bundles and the two build
//! durations. Deltas are always current minus baseline; both sides and the
//! size deltas go through the shared size formatter, duration deltas render
//! as signed whole seconds. The `+` prefix is applied at render time, not
//! stored in the row.

use console::{measure_text_width, style};
use serde::Serialize;

use crate::fmt::{approx_seconds, delta_seconds, humanize, prefix_delta};
use crate::measure::BranchStats;

/// One derived, display-only record per metric.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    /// Metric label (e.g. "vendor.js", "Prod build")
    pub item: String,
    /// Baseline value, formatted
    pub before: String,
    /// Current value, formatted
    pub after: String,
    /// Current minus baseline, formatted but not yet sign-prefixed
    pub delta: String,
}

fn size_row(item: impl Into<String>, baseline: u64, current: u64) -> ComparisonRow {
    ComparisonRow {
        item: item.into(),
        before: humanize(baseline as i64),
        after: humanize(current as i64),
        delta: humanize(current as i64 - baseline as i64),
    }
}

fn duration_row(item: impl Into<String>, baseline: u64, current: u64) -> ComparisonRow {
    ComparisonRow {
        item: item.into(),
        before: approx_seconds(baseline),
        after: approx_seconds(current),
        delta: delta_seconds(current as i64 - baseline as i64),
    }
}

/// Compute the six comparison rows for one run.
pub fn comparison_rows(
    app: &str,
    current: &BranchStats,
    baseline: &BranchStats,
) -> Vec<ComparisonRow> {
    vec![
        size_row("vendor.js", baseline.vendor_js, current.vendor_js),
        size_row("vendor.css", baseline.vendor_css, current.vendor_css),
        size_row(format!("{}.js", app), baseline.app_js, current.app_js),
        size_row(format!("{}.css", app), baseline.app_css, current.app_css),
        duration_row("Prod build", baseline.prod_build, current.prod_build),
        duration_row("Dev build", baseline.dev_build, current.dev_build),
    ]
}

/// Render the comparison table.
///
/// Columns are `Item | Before | After | ±`; every non-negative, non-zero
/// delta gains a `+` prefix. Growth is styled red, shrinkage green.
pub fn render_table(rows: &[ComparisonRow]) -> String {
    const HEADERS: [&str; 4] = ["Item", "Before", "After", "±"];

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.item.clone(),
                row.before.clone(),
                row.after.clone(),
                prefix_delta(&row.delta),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(measure_text_width);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let mut out = String::new();

    let header = format!(
        "{:<iw$}  {:>bw$}  {:>aw$}  {:>dw$}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        HEADERS[3],
        iw = widths[0],
        bw = widths[1],
        aw = widths[2],
        dw = widths[3],
    );
    out.push_str(&style(header).bold().to_string());
    out.push('\n');

    for row in &cells {
        let delta_cell = format!("{:>dw$}", row[3], dw = widths[3]);
        let delta_cell = if row[3].starts_with('+') {
            style(delta_cell).red()
        } else if row[3].starts_with('-') {
            style(delta_cell).green()
        } else {
            style(delta_cell).dim()
        };

        out.push_str(&format!(
            "{:<iw$}  {:>bw$}  {:>aw$}  {}",
            row[0],
            row[1],
            row[2],
            delta_cell,
            iw = widths[0],
            bw = widths[1],
            aw = widths[2],
        ));
        out.push('\n');
    }

    out
}

/// Build the machine-readable report emitted with `--json`.
pub fn json_report(
    current_branch: &str,
    baseline_branch: &str,
    current: &BranchStats,
    baseline: &BranchStats,
    rows: &[ComparisonRow],
) -> serde_json::Value {
    serde_json::json!({
        "current": { "branch": current_branch, "stats": current },
        "baseline": { "branch": baseline_branch, "stats": baseline },
        "rows": rows,
    })
}
