//! Aggregator service for computing spending summaries
//!
//! Pure functions over a slice of entries: nothing here reads or writes
//! the store, and identical inputs always produce identical rows.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::services::format::bucket_label;
use crate::types::{CategoryRow, Entry, Granularity, SeriesRow, SpendingReport, Window};

/// Aggregator for computing spending statistics
pub struct Aggregator;

impl Aggregator {
    /// Entries inside `window`, input order preserved
    pub fn window(entries: &[Entry], window: Window) -> Vec<&Entry> {
        entries.iter().filter(|e| window.contains(e.date)).collect()
    }

    /// Sum amounts per time bucket (sorted by bucket start ascending)
    pub fn series<'a, I>(entries: I, granularity: Granularity) -> Vec<SeriesRow>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut buckets: HashMap<NaiveDate, f64> = HashMap::new();

        for entry in entries {
            let start = granularity.bucket_start(entry.date);
            *buckets.entry(start).or_insert(0.0) += entry.amount;
        }

        // Sort on the bucket's start date, labels are derived afterwards
        let mut sorted: Vec<(NaiveDate, f64)> = buckets.into_iter().collect();
        sorted.sort_by_key(|(start, _)| *start);

        sorted
            .into_iter()
            .map(|(start, total)| SeriesRow {
                key: granularity.bucket_key(start),
                start,
                label: bucket_label(granularity, start),
                total,
            })
            .collect()
    }

    /// Sum amounts per category, in order of first appearance
    pub fn by_category<'a, I>(entries: I) -> Vec<CategoryRow>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut rows: Vec<CategoryRow> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for entry in entries {
            match index.get(entry.category.as_str()) {
                Some(&i) => rows[i].total += entry.amount,
                None => {
                    index.insert(entry.category.as_str(), rows.len());
                    rows.push(CategoryRow {
                        category: entry.category.clone(),
                        total: entry.amount,
                    });
                }
            }
        }

        rows
    }

    /// Sum of all amounts
    pub fn total<'a, I>(entries: I) -> f64
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        entries.into_iter().map(|e| e.amount).sum()
    }

    /// Window the entries once and compute every view from the result
    pub fn report(entries: &[Entry], window: Window, granularity: Granularity) -> SpendingReport {
        let retained = Self::window(entries, window);

        SpendingReport {
            window,
            granularity,
            series: Self::series(retained.iter().copied(), granularity),
            breakdown: Self::by_category(retained.iter().copied()),
            filtered_total: Self::total(retained.iter().copied()),
            global_total: Self::total(entries),
            entry_count: retained.len(),
        }
    }
}
