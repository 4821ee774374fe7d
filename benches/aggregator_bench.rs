//! Criterion benchmarks for the spending aggregator

use std::hint::black_box;

use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spendlog::services::Aggregator;
use spendlog::types::{Entry, Granularity, Window, YearMonth};

const CATEGORIES: &[&str] = &["Food", "Transport", "Shopping", "Bills", "Health"];

/// Deterministic journal spread over roughly three years
fn make_entries(count: usize) -> Vec<Entry> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default();
    (0..count)
        .map(|i| Entry {
            id: i as u64 + 1,
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            description: None,
            amount: ((i * 37) % 500) as f64 + 0.25,
            date: start
                .checked_add_days(Days::new((i * 7 % 1095) as u64))
                .unwrap_or(start),
        })
        .collect()
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregator");

    for count in [1_000usize, 10_000, 100_000] {
        let entries = make_entries(count);
        group.throughput(Throughput::Elements(count as u64));

        for granularity in [Granularity::Daily, Granularity::Weekly, Granularity::Monthly] {
            group.bench_with_input(
                BenchmarkId::new(format!("report_all_{}", granularity.label()), count),
                &entries,
                |b, entries| {
                    b.iter(|| Aggregator::report(black_box(entries), Window::AllTime, granularity));
                },
            );
        }
    }

    group.finish();
}

fn bench_month_window(c: &mut Criterion) {
    let entries = make_entries(100_000);
    let month = YearMonth::new(2023, 6).map(Window::Month).unwrap_or_default();

    let mut group = c.benchmark_group("aggregator");
    group.throughput(Throughput::Elements(entries.len() as u64));

    group.bench_function("report_month_daily", |b| {
        b.iter(|| Aggregator::report(black_box(&entries), month, Granularity::Daily));
    });

    group.bench_function("by_category", |b| {
        b.iter(|| Aggregator::by_category(black_box(&entries)));
    });

    group.finish();
}

criterion_group!(benches, bench_report, bench_month_window);
criterion_main!(benches);
