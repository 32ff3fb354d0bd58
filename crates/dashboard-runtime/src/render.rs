//! One dashboard render: load, aggregate, chart.
//!
//! [`render`] never returns partial output. Either every KPI card and chart
//! is present in [`RenderOutcome::Ready`], or the pass stops at the first
//! failure and only an [`ErrorReport`] comes back.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use dashboard_charts::{build_category_chart, build_region_chart, build_trend_chart, ChartSpec};
use dashboard_core::error::{DashboardError, ErrorKind, Result};
use dashboard_core::formatting::{format_count, format_currency};
use dashboard_core::models::TransactionTable;
use dashboard_data::aggregator::{Kpis, SalesAggregator};
use dashboard_data::loader::load_transactions;
use serde::Serialize;

use crate::cache::{CacheStatus, LoadCache};

// ── Public types ──────────────────────────────────────────────────────────────

/// A labelled, display-ready KPI value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

/// Everything the presentation layer needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    /// Raw KPI values.
    pub kpis: Kpis,
    /// `Total Sales` as currency and `Total Orders` with grouped thousands.
    pub cards: Vec<KpiCard>,
    pub sales_trend: ChartSpec,
    pub sales_by_category: ChartSpec,
    pub sales_by_region: ChartSpec,
    /// Number of line items behind the figures.
    pub records: usize,
}

/// User-facing description of why a render halted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub heading: String,
    pub message: String,
}

impl ErrorReport {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            heading: kind.heading().to_string(),
            message: message.into(),
        }
    }
}

impl From<&DashboardError> for ErrorReport {
    fn from(err: &DashboardError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Result of one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RenderOutcome {
    Ready {
        view: Box<DashboardView>,
        cache: CacheStatus,
    },
    Halted {
        error: ErrorReport,
    },
}

impl RenderOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

pub const DASHBOARD_TITLE: &str = "ShopSmart Sales Dashboard";

// ── Public functions ──────────────────────────────────────────────────────────

/// Run one full render pass for the dataset at `path`.
///
/// Loader failures, aggregation failures, and any panic raised while loading
/// end the pass with [`RenderOutcome::Halted`].
pub fn render(cache: &mut LoadCache, path: &Path) -> RenderOutcome {
    render_with(cache, path, load_transactions)
}

/// Same as [`render`] with an explicit load step, used when the table comes
/// from somewhere other than [`load_transactions`].
pub fn render_with(
    cache: &mut LoadCache,
    path: &Path,
    loader: impl FnOnce(&Path) -> Result<TransactionTable>,
) -> RenderOutcome {
    let loaded = catch_unwind(AssertUnwindSafe(|| cache.get_or_load_with(path, loader)));

    let (table, status) = match loaded {
        Ok(Ok(loaded)) => loaded,
        Ok(Err(err)) => return halt(&err),
        Err(panic) => {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown failure".to_string());
            tracing::error!(%detail, "loader panicked; render halted");
            return RenderOutcome::Halted {
                error: ErrorReport::new(ErrorKind::Unexpected, detail),
            };
        }
    };

    let view = match build_view(&table) {
        Ok(view) => view,
        Err(err) => return halt(&err),
    };
    tracing::info!(
        records = view.records,
        total_orders = view.kpis.total_orders,
        cache = ?status,
        "dashboard rendered"
    );
    RenderOutcome::Ready {
        view: Box::new(view),
        cache: status,
    }
}

/// Aggregate and chart an already-validated table.
pub fn build_view(table: &TransactionTable) -> Result<DashboardView> {
    let kpis = SalesAggregator::compute_kpis(table)?;
    let cards = vec![
        KpiCard {
            label: "Total Sales".to_string(),
            value: format_currency(kpis.total_sales),
        },
        KpiCard {
            label: "Total Orders".to_string(),
            value: format_count(kpis.total_orders),
        },
    ];

    Ok(DashboardView {
        title: DASHBOARD_TITLE.to_string(),
        kpis,
        cards,
        sales_trend: build_trend_chart(&SalesAggregator::aggregate_by_date(table)?),
        sales_by_category: build_category_chart(&SalesAggregator::aggregate_by_category(table)?),
        sales_by_region: build_region_chart(&SalesAggregator::aggregate_by_region(table)?),
        records: table.len(),
    })
}

fn halt(err: &DashboardError) -> RenderOutcome {
    tracing::warn!(kind = %err.kind(), error = %err, "render halted");
    RenderOutcome::Halted {
        error: ErrorReport::from(err),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
