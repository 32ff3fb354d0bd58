use rust_decimal::Decimal;
use serde::Serialize;

/// Tick format for currency axes: dollar sign, grouped thousands, no cents.
pub const CURRENCY_TICK_FORMAT: &str = "$,.0f";

/// Default chart height in pixels.
pub const DEFAULT_HEIGHT: u32 = 400;

/// Series colours.
pub const TREND_COLOR: &str = "#1f77b4";
pub const CATEGORY_COLOR: &str = "#2ca02c";
pub const REGION_COLOR: &str = "#ff7f0e";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// How a renderer should format an axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AxisFormat {
    /// Calendar dates rendered as `YYYY-MM-DD`.
    Date,
    /// Discrete labels.
    Category,
    /// Monetary values; `tick_format` is a d3-style format string.
    Currency { tick_format: String },
}

impl AxisFormat {
    pub fn currency() -> Self {
        Self::Currency {
            tick_format: CURRENCY_TICK_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisSpec {
    pub label: String,
    pub format: AxisFormat,
}

impl AxisSpec {
    pub fn new(label: impl Into<String>, format: AxisFormat) -> Self {
        Self {
            label: label.into(),
            format,
        }
    }
}

/// One plotted value plus the text its hover tooltip shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub y: Decimal,
    pub tooltip: String,
}

/// A complete, renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    /// Stable identifier, e.g. `"sales_trend"`.
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub points: Vec<ChartPoint>,
    pub color: String,
    pub height: u32,
    /// When set, renderers must draw points in the given order rather than
    /// re-sorting the x axis.
    pub preserve_order: bool,
}

impl ChartSpec {
    pub fn x_values(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.x.as_str()).collect()
    }

    pub fn y_values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChartSpec {
        ChartSpec {
            id: "sample".to_string(),
            kind: ChartKind::Bar,
            title: "Sample".to_string(),
            x_axis: AxisSpec::new("Label", AxisFormat::Category),
            y_axis: AxisSpec::new("Value", AxisFormat::currency()),
            points: vec![ChartPoint {
                x: "a".to_string(),
                y: Decimal::new(1250, 2),
                tooltip: "a | $12.50".to_string(),
            }],
            color: CATEGORY_COLOR.to_string(),
            height: DEFAULT_HEIGHT,
            preserve_order: true,
        }
    }

    #[test]
    fn test_accessors() {
        let spec = sample();
        assert_eq!(spec.x_values(), vec!["a"]);
        assert_eq!(spec.y_values(), vec![Decimal::new(1250, 2)]);
        assert!(!spec.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["x_axis"]["format"]["type"], "category");
        assert_eq!(json["y_axis"]["format"]["type"], "currency");
        assert_eq!(json["y_axis"]["format"]["tick_format"], "$,.0f");
        assert_eq!(json["points"][0]["y"], serde_json::json!(12.5));
        assert_eq!(json["preserve_order"], true);
    }
}
