//! Chart specifications for the sales dashboard.
//!
//! Builders shape already-aggregated rows into renderer-agnostic
//! [`spec::ChartSpec`] values. Nothing here aggregates or draws.

pub mod category;
pub mod spec;
pub mod trend;

pub use category::{build_category_chart, build_region_chart};
pub use spec::{AxisFormat, AxisSpec, ChartKind, ChartPoint, ChartSpec};
pub use trend::build_trend_chart;
