//! Property tests for the query engine and session store invariants.
//!
//! Uses proptest to verify:
//! 1. Category filtering never invents or mislabels entries
//! 2. Performance sorts are monotone and stable across ties
//! 3. Date-window filtering keeps every timestamp inside [start, end + 1 day)
//! 4. Clearing filters is idempotent
//! 5. Deleting ids absent from the store is a no-op

use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use signalstream_core::domain::{
    Direction, StrategyId, StrategyPerformance, TradingSignal, TradingStrategy,
};
use signalstream_core::forms::StrategyDraft;
use signalstream_core::query::{SignalQuery, StrategyQuery, StrategySort};
use signalstream_core::store::SessionStore;

// ── Strategies (proptest) ────────────────────────────────────────────

const CATEGORIES: [&str; 4] = ["Trend Following", "Momentum", "Reversal", "Mean Reversion"];

fn arb_category() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => proptest::sample::select(&CATEGORIES[..]).prop_map(|c| Some(c.to_string())),
        1 => Just(None),
    ]
}

fn arb_win_rate() -> impl Strategy<Value = f64> {
    // Coarse grid so collisions (ties) actually happen.
    (0u32..=500).prop_map(|n| n as f64 / 5.0)
}

fn arb_catalog() -> impl Strategy<Value = Vec<TradingStrategy>> {
    prop::collection::vec((arb_category(), arb_win_rate(), 0.0..4.0_f64), 0..24).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (category, win_rate, profit_factor))| TradingStrategy {
                    id: StrategyId::new(format!("strat_{i}")),
                    name: format!("Strategy {i}"),
                    description: "Generated for query property tests.".to_string(),
                    category,
                    indicators_used: None,
                    performance: StrategyPerformance {
                        win_rate,
                        profit_factor,
                        sharpe_ratio: None,
                        max_drawdown: None,
                    },
                })
                .collect()
        },
    )
}

fn arb_signal() -> impl Strategy<Value = TradingSignal> {
    // Timestamps spread over ~60 days around a fixed anchor.
    (
        proptest::sample::select(&["AAPL", "TSLA", "SPY", "BTC/USD"][..]),
        0i64..(60 * 24 * 60),
        50.0..550.0_f64,
    )
        .prop_map(|(asset, age_minutes, entry)| {
            let anchor = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
            TradingSignal {
                asset: asset.to_string(),
                direction: Direction::Buy,
                entry_price: entry,
                stop_loss: entry - 5.0,
                target_price: entry + 5.0,
                strategy_id: StrategyId::new("SMA_Crossover_1"),
                timestamp: anchor - Duration::minutes(age_minutes),
                indicator_values: HashMap::new(),
            }
        })
}

fn arb_feed() -> impl Strategy<Value = Vec<TradingSignal>> {
    prop::collection::vec(arb_signal(), 0..40)
}

// ── 1. Category filtering ────────────────────────────────────────────

proptest! {
    /// Every survivor of a category filter carries exactly that category,
    /// and filtering never grows the collection.
    #[test]
    fn category_filter_is_a_subset(catalog in arb_catalog()) {
        for category in CATEGORIES {
            let query = StrategyQuery {
                category: Some(category.to_string()),
                sort: StrategySort::Name,
            };
            let out = query.apply(&catalog);
            prop_assert!(out.len() <= catalog.len());
            for strategy in out {
                prop_assert_eq!(strategy.category.as_deref(), Some(category));
            }
        }
    }

    /// No filter keeps every entry.
    #[test]
    fn no_category_filter_keeps_everything(catalog in arb_catalog()) {
        let out = StrategyQuery::default().apply(&catalog);
        prop_assert_eq!(out.len(), catalog.len());
    }
}

// ── 2. Sort order and stability ──────────────────────────────────────

proptest! {
    /// Win-rate sort is non-increasing, and ties keep catalog order.
    #[test]
    fn win_rate_sort_is_monotone_and_stable(catalog in arb_catalog()) {
        let query = StrategyQuery {
            category: None,
            sort: StrategySort::WinRate,
        };
        let out = query.apply(&catalog);

        let original_pos = |id: &StrategyId| {
            catalog.iter().position(|s| &s.id == id).unwrap()
        };
        for pair in out.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.performance.win_rate >= b.performance.win_rate);
            if a.performance.win_rate == b.performance.win_rate {
                prop_assert!(original_pos(&a.id) < original_pos(&b.id));
            }
        }
    }

    /// Profit-factor sort is non-increasing.
    #[test]
    fn profit_factor_sort_is_monotone(catalog in arb_catalog()) {
        let query = StrategyQuery {
            category: None,
            sort: StrategySort::ProfitFactor,
        };
        let out = query.apply(&catalog);
        for pair in out.windows(2) {
            prop_assert!(pair[0].performance.profit_factor >= pair[1].performance.profit_factor);
        }
    }
}

// ── 3. Date windows ──────────────────────────────────────────────────

proptest! {
    /// Every signal surviving a start/end window lies inside
    /// [start 00:00, end + 1 day 00:00), and the output stays newest-first.
    #[test]
    fn date_window_bounds_hold(feed in arb_feed(), start_off in 0i64..50, len in 0i64..20) {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap().date_naive()
            + Duration::days(start_off);
        let end = start + Duration::days(len);

        let query = SignalQuery {
            asset: None,
            strategy_id: None,
            start_date: Some(start),
            end_date: Some(end),
        };
        let out = query.apply(&feed);

        let lower = start.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let upper = (end + Duration::days(1)).and_hms_opt(0, 0, 0).unwrap().and_utc();
        for signal in &out {
            prop_assert!(signal.timestamp >= lower);
            prop_assert!(signal.timestamp < upper);
        }
        for pair in out.windows(2) {
            prop_assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }
}

// ── 4. Clearing filters ──────────────────────────────────────────────

proptest! {
    /// Clearing twice is the same as clearing once, and both yield the
    /// unfiltered default-sorted view.
    #[test]
    fn clear_is_idempotent(feed in arb_feed(), asset in "[A-Z]{3,4}") {
        let mut query = SignalQuery {
            asset: Some(asset),
            strategy_id: Some(StrategyId::new("SMA_Crossover_1")),
            start_date: None,
            end_date: None,
        };

        query.clear();
        let once = query.clone();
        let view_once: Vec<_> = query.apply(&feed);

        query.clear();
        prop_assert_eq!(&query, &once);
        let view_twice: Vec<_> = query.apply(&feed);
        prop_assert_eq!(&view_once, &view_twice);
        prop_assert_eq!(view_twice.len(), feed.len());
    }
}

// ── 5. Store deletion semantics ──────────────────────────────────────

proptest! {
    /// Deleting an id that is not in the catalog never errors and leaves the
    /// collection length unchanged.
    #[test]
    fn deleting_missing_ids_is_a_noop(catalog in arb_catalog(), suffix in "[a-z]{6}") {
        let len = catalog.len();
        let mut store = SessionStore::new(Vec::new(), catalog, Vec::new());

        let missing = StrategyId::new(format!("absent_{suffix}"));
        prop_assert!(!store.delete_strategy(&missing));
        prop_assert_eq!(store.strategies().len(), len);
    }
}

// ── Round-trip (unit, not property) ──────────────────────────────────

#[test]
fn unchanged_edit_round_trips_the_record() {
    for original in signalstream_core::data::sample::strategy_catalog() {
        let draft = StrategyDraft::from_strategy(&original);
        let valid = draft.validate().expect("catalog entries are valid drafts");
        let rebuilt = valid.into_strategy(original.id.clone());
        assert_eq!(rebuilt, original);
    }
}

#[test]
fn exact_tie_value_keeps_input_order() {
    // Two entries sharing the exact win rate 55.2 must keep relative order.
    let make = |id: &str| TradingStrategy {
        id: StrategyId::new(id),
        name: id.to_string(),
        description: "Tie-breaking fixture for the stable sort.".to_string(),
        category: None,
        indicators_used: None,
        performance: StrategyPerformance {
            win_rate: 55.2,
            profit_factor: 1.0,
            sharpe_ratio: None,
            max_drawdown: None,
        },
    };
    let catalog = vec![make("earlier"), make("later")];
    let query = StrategyQuery {
        category: None,
        sort: StrategySort::WinRate,
    };
    let ids: Vec<&str> = query.apply(&catalog).iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["earlier", "later"]);
}
