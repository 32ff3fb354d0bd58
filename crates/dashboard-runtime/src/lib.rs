//! Render pipeline for the sales dashboard.
//!
//! Owns the memoized load cache and runs one Loader → Aggregator → Chart
//! Builders pass per render, producing either a complete view or a halt.

pub mod cache;
pub mod render;

pub use dashboard_charts as charts;
pub use dashboard_core as core;
pub use dashboard_data as data;
