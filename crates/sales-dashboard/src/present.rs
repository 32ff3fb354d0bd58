//! Plain-text and JSON presentation of a render outcome.

use std::fmt::Write as _;

use dashboard_charts::{AxisFormat, ChartSpec};
use dashboard_core::formatting::format_currency;
use dashboard_runtime::render::{DashboardView, ErrorReport, RenderOutcome};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Width of the longest bar in the text bar charts.
const BAR_WIDTH: usize = 40;

/// Render the dashboard as a terminal-friendly report.
pub fn text_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 {}", view.title);
    let _ = writeln!(out, "{}", "=".repeat(view.title.chars().count() + 3));
    for card in &view.cards {
        let _ = writeln!(out, "{:<14} {}", format!("{}:", card.label), card.value);
    }

    for chart in [&view.sales_trend, &view.sales_by_category, &view.sales_by_region] {
        out.push('\n');
        out.push_str(&text_chart(chart));
    }
    out
}

/// One chart as a labelled list of horizontal bars.
pub fn text_chart(chart: &ChartSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.title);
    let _ = writeln!(out, "{}", "-".repeat(chart.title.chars().count()));

    if chart.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    let label_width = chart
        .points
        .iter()
        .map(|p| p.x.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart
        .points
        .iter()
        .map(|p| p.y)
        .max()
        .unwrap_or_default();

    for point in &chart.points {
        let len = if max.is_zero() {
            0
        } else {
            (point.y / max * Decimal::from(BAR_WIDTH as u64))
                .round()
                .to_usize()
                .unwrap_or(0)
        };
        let value = match chart.y_axis.format {
            AxisFormat::Currency { .. } => format_currency(point.y),
            _ => point.y.to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<width$}  {:<bar$}  {}",
            point.x,
            "█".repeat(len),
            value,
            width = label_width,
            bar = BAR_WIDTH,
        );
    }
    out
}

/// Pretty-printed JSON of the whole outcome, for an external renderer.
pub fn json_outcome(outcome: &RenderOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

/// Single-line error banner shown instead of the dashboard.
pub fn text_error(error: &ErrorReport) -> String {
    format!("❌ {}: {}", error.heading, error.message)
}
