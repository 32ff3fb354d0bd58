//! Data ingestion layer for the sales dashboard.
//!
//! Reads and validates the transaction CSV, then groups and sums it into the
//! figures the dashboard displays.

pub mod aggregator;
pub mod loader;

pub use dashboard_core as core;
