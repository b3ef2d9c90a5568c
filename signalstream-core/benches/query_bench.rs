//! Criterion benchmarks for the query engine.
//!
//! Benchmarks:
//! 1. Signal feed filtering + newest-first sort at growing feed sizes
//! 2. Strategy catalog filter + sort combinations
//! 3. Distinct-option derivation (assets, strategy ids, categories)
//! 4. User substring search

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::{NaiveDate, TimeZone, Utc};
use signalstream_core::data::sample::{strategy_catalog, user_roster};
use signalstream_core::data::{DataProvider, SampleProvider};
use signalstream_core::domain::{StrategyId, TradingSignal, TradingStrategy};
use signalstream_core::query::{
    distinct_assets, distinct_categories, distinct_strategy_ids, search_users, SignalQuery,
    StrategyQuery, StrategySort,
};

fn make_feed(n: usize) -> Vec<TradingSignal> {
    let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    SampleProvider::anchored(42, anchor)
        .with_signal_count(n)
        .fetch_signals()
        .expect("sample provider cannot fail without the outage toggle")
}

fn make_catalog(n: usize) -> Vec<TradingStrategy> {
    // Repeat the fixed catalog with distinct ids to reach the target size.
    let base = strategy_catalog();
    (0..n)
        .map(|i| {
            let mut s = base[i % base.len()].clone();
            s.id = StrategyId::new(format!("{}_{i}", s.id));
            s
        })
        .collect()
}

fn bench_signal_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("signal_query");
    for size in [25usize, 500, 5_000] {
        let feed = make_feed(size);
        let query = SignalQuery {
            asset: Some("AAPL".to_string()),
            strategy_id: None,
            start_date: NaiveDate::from_ymd_opt(2024, 5, 28),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 31),
        };
        group.bench_with_input(BenchmarkId::new("filter_and_sort", size), &feed, |b, feed| {
            b.iter(|| black_box(query.apply(black_box(feed))));
        });
    }
    group.finish();
}

fn bench_strategy_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy_query");
    let catalog = make_catalog(1_000);
    for sort in StrategySort::ALL {
        let query = StrategyQuery {
            category: Some("Trend Following".to_string()),
            sort,
        };
        group.bench_with_input(
            BenchmarkId::new("filter_and_sort", format!("{sort:?}")),
            &catalog,
            |b, catalog| {
                b.iter(|| black_box(query.apply(black_box(catalog))));
            },
        );
    }
    group.finish();
}

fn bench_distinct_options(c: &mut Criterion) {
    let feed = make_feed(5_000);
    let catalog = make_catalog(1_000);

    c.bench_function("distinct_assets_5000", |b| {
        b.iter(|| black_box(distinct_assets(black_box(&feed))));
    });
    c.bench_function("distinct_strategy_ids_5000", |b| {
        b.iter(|| black_box(distinct_strategy_ids(black_box(&feed))));
    });
    c.bench_function("distinct_categories_1000", |b| {
        b.iter(|| black_box(distinct_categories(black_box(&catalog))));
    });
}

fn bench_user_search(c: &mut Criterion) {
    // Repeat the roster to a plausibly large admin listing.
    let roster = user_roster();
    let users: Vec<_> = (0..500).flat_map(|_| roster.clone()).collect();

    c.bench_function("search_users_3000", |b| {
        b.iter(|| black_box(search_users(black_box(&users), black_box("example.com"))));
    });
}

criterion_group!(
    benches,
    bench_signal_query,
    bench_strategy_query,
    bench_distinct_options,
    bench_user_search
);
criterion_main!(benches);
