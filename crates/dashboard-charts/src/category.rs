//! Ranked bar charts (sales by category, sales by region).

use dashboard_core::formatting::format_currency;
use dashboard_data::aggregator::{CategorySales, RegionSales};
use rust_decimal::Decimal;

use crate::spec::{
    AxisFormat, AxisSpec, ChartKind, ChartPoint, ChartSpec, CATEGORY_COLOR, DEFAULT_HEIGHT,
    REGION_COLOR,
};

/// Bar chart of category totals. Input must already be ranked; the spec
/// keeps that order and tells the renderer not to reorder.
pub fn build_category_chart(categories: &[CategorySales]) -> ChartSpec {
    ranked_bar_chart(
        "sales_by_category",
        "Sales by Product Category",
        "Product Category",
        CATEGORY_COLOR,
        categories.iter().map(|c| (c.category.as_str(), c.total)),
    )
}

/// Bar chart of region totals, ranked like the category chart.
pub fn build_region_chart(regions: &[RegionSales]) -> ChartSpec {
    ranked_bar_chart(
        "sales_by_region",
        "Sales by Region",
        "Region",
        REGION_COLOR,
        regions.iter().map(|r| (r.region.as_str(), r.total)),
    )
}

fn ranked_bar_chart<'a>(
    id: &str,
    title: &str,
    x_label: &str,
    color: &str,
    rows: impl Iterator<Item = (&'a str, Decimal)>,
) -> ChartSpec {
    let points = rows
        .map(|(label, total)| ChartPoint {
            x: label.to_string(),
            y: total,
            tooltip: format!("{} | Sales: {}", label, format_currency(total)),
        })
        .collect();

    ChartSpec {
        id: id.to_string(),
        kind: ChartKind::Bar,
        title: title.to_string(),
        x_axis: AxisSpec::new(x_label, AxisFormat::Category),
        y_axis: AxisSpec::new("Total Sales ($)", AxisFormat::currency()),
        points,
        color: color.to_string(),
        height: DEFAULT_HEIGHT,
        preserve_order: true,
    }
}
