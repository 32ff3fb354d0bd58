//! KPI and grouped-sum aggregation over a validated transaction table.
//!
//! Everything here is pure: no I/O, no logging, same input same output.
//! Sums use checked arithmetic; an out-of-range total is a data error.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use dashboard_core::error::{DashboardError, IntegrityViolation, Result};
use dashboard_core::models::{Category, Region, Transaction, TransactionTable};
use rust_decimal::Decimal;
use serde::Serialize;

// ── Result types ──────────────────────────────────────────────────────────────

/// Headline figures shown on the KPI cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Kpis {
    /// Sum of `total_amount` over every line item.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    /// Number of distinct order IDs, not the number of line items.
    pub total_orders: usize,
}

/// Sales summed over one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Sales summed over one product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySales {
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Sales summed over one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionSales {
    pub region: Region,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that summarises and groups transactions.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Total sales and distinct order count.
    ///
    /// Fails when the sum of amounts exceeds the `Decimal` range.
    pub fn compute_kpis(table: &TransactionTable) -> Result<Kpis> {
        let total_sales = table
            .iter()
            .try_fold(Decimal::ZERO, |acc, t| checked_total(acc, t.total_amount))?;
        let total_orders = table
            .iter()
            .map(|t| t.order_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        Ok(Kpis {
            total_sales,
            total_orders,
        })
    }

    /// One row per distinct date, ascending.
    pub fn aggregate_by_date(table: &TransactionTable) -> Result<Vec<DailySales>> {
        Ok(Self::sum_by(table, |t| t.date)?
            .into_iter()
            .map(|(date, total)| DailySales { date, total })
            .collect())
    }

    /// One row per category present, descending by total. Equal totals are
    /// ordered by category label so the result never depends on row order.
    pub fn aggregate_by_category(table: &TransactionTable) -> Result<Vec<CategorySales>> {
        Ok(Self::ranked(Self::sum_by(table, |t| t.category)?, |c| c.as_str())
            .into_iter()
            .map(|(category, total)| CategorySales { category, total })
            .collect())
    }

    /// One row per region present, ranked like [`Self::aggregate_by_category`].
    pub fn aggregate_by_region(table: &TransactionTable) -> Result<Vec<RegionSales>> {
        Ok(Self::ranked(Self::sum_by(table, |t| t.region)?, |r| r.as_str())
            .into_iter()
            .map(|(region, total)| RegionSales { region, total })
            .collect())
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic grouping driver; `BTreeMap` keeps keys sorted.
    fn sum_by<K: Ord>(
        table: &TransactionTable,
        key_fn: impl Fn(&Transaction) -> K,
    ) -> Result<BTreeMap<K, Decimal>> {
        let mut map: BTreeMap<K, Decimal> = BTreeMap::new();
        for transaction in table {
            let sum = map.entry(key_fn(transaction)).or_default();
            *sum = checked_total(*sum, transaction.total_amount)?;
        }
        Ok(map)
    }

    fn ranked<K>(
        sums: BTreeMap<K, Decimal>,
        label: impl Fn(&K) -> &'static str,
    ) -> Vec<(K, Decimal)> {
        let mut rows: Vec<(K, Decimal)> = sums.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| label(&a.0).cmp(label(&b.0))));
        rows
    }
}

fn checked_total(acc: Decimal, amount: Decimal) -> Result<Decimal> {
    acc.checked_add(amount)
        .ok_or_else(|| DashboardError::from(IntegrityViolation::TotalOutOfRange))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
