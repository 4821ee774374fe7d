//! Aggregate rows produced by the aggregator

use chrono::NaiveDate;
use serde::Serialize;

use super::{Granularity, Window};

/// One time bucket of the spending series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesRow {
    /// Canonical bucket key (`YYYY-MM-DD` for days and weeks, `YYYY-MM` for months)
    pub key: String,
    /// First calendar day of the bucket
    pub start: NaiveDate,
    /// Human-readable bucket label
    pub label: String,
    pub total: f64,
}

/// Spending summed for one category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub total: f64,
}

/// Everything the dashboard needs for one (window, granularity) selection
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpendingReport {
    pub window: Window,
    pub granularity: Granularity,
    /// Sorted ascending by bucket start
    pub series: Vec<SeriesRow>,
    /// In order of first appearance within the window
    pub breakdown: Vec<CategoryRow>,
    /// Sum over entries inside the window
    pub filtered_total: f64,
    /// Sum over every entry, ignoring the window
    pub global_total: f64,
    /// Number of entries inside the window
    pub entry_count: usize,
}

impl SpendingReport {
    /// Largest bucket total (0 when empty)
    pub fn peak_bucket_total(&self) -> f64 {
        self.series.iter().map(|r| r.total).fold(0.0, f64::max)
    }
}
