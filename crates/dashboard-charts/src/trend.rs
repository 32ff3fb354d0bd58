//! Sales-over-time line chart.

use dashboard_core::formatting::format_currency;
use dashboard_data::aggregator::DailySales;

use crate::spec::{
    AxisFormat, AxisSpec, ChartKind, ChartPoint, ChartSpec, DEFAULT_HEIGHT, TREND_COLOR,
};

/// Line chart of daily sales, one point per date in the order given.
///
/// Tooltips show the exact date and the sum as 2-decimal currency.
pub fn build_trend_chart(daily: &[DailySales]) -> ChartSpec {
    let points = daily
        .iter()
        .map(|day| {
            let date = day.date.format("%Y-%m-%d").to_string();
            ChartPoint {
                tooltip: format!("Date: {} | Sales: {}", date, format_currency(day.total)),
                x: date,
                y: day.total,
            }
        })
        .collect();

    ChartSpec {
        id: "sales_trend".to_string(),
        kind: ChartKind::Line,
        title: "Sales Trend Over Time".to_string(),
        x_axis: AxisSpec::new("Date", AxisFormat::Date),
        y_axis: AxisSpec::new("Sales ($)", AxisFormat::currency()),
        points,
        color: TREND_COLOR.to_string(),
        height: DEFAULT_HEIGHT,
        preserve_order: false,
    }
}
